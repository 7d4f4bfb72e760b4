//! Store adapters for the roster port.

mod memory;
mod postgres;
