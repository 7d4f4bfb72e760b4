//! Identity resolution for mentors and students.
//!
//! Users authenticate with a cohort-prefixed user ID such as `26STD0001` and
//! an opaque credential. The stored role is authoritative; the ID prefix is
//! used to allocate new IDs and is checked against the role at registration
//! and at resolution. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
