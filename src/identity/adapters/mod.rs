//! Store adapters for the user directory port.

mod memory;
pub(crate) mod postgres;
