//! Unit tests for the assignment module.

mod domain_tests;
mod service_tests;
