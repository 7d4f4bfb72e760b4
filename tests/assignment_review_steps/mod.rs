//! Step definitions for assignment review scenarios.

mod given;
mod then;
mod when;
pub mod world;
