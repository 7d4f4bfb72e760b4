//! Store adapters for the catalog port.

mod memory;
mod postgres;
