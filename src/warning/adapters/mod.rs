//! Store adapters for the warning port.

mod memory;
mod postgres;
