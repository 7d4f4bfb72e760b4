//! Read-only mentor and student projections.
//!
//! Dashboards are computed on read from assignments, warnings and roster
//! links. They need not be linearizable with concurrent writes.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
