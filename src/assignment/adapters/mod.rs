//! Store adapters for the assignment port.

mod memory;
mod postgres;
