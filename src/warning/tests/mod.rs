//! Unit tests for the warning module.

mod service_tests;
