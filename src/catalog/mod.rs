//! Course and task catalog.
//!
//! Mentors own courses and author task templates inside them. Ownership of a
//! task always traces through its course, which is what the assignment
//! lifecycle checks before a mentor assigns or reviews work.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
