//! Service orchestration for identity resolution.

mod resolver;

pub use resolver::{IdentityError, IdentityResolver, IdentityResult, RegisterUserRequest};
pub(crate) use resolver::next_user_id;
