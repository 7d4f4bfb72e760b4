//! Task assignment, submission and review lifecycle.
//!
//! An assignment ties one task to one student. Every status change goes
//! through [`domain::AssignmentStatus::apply`], and persisted updates are
//! conditional on the status the transition started from.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
