//! Store adapters for the notification port.

mod memory;
mod postgres;
