//! Behavioural warning issue and resolution lifecycle.
//!
//! Mentors issue warnings to linked students; students resolve them with a
//! comment. Issuing increments the student's warning counter in the same
//! store transaction, and the counter never goes down.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
