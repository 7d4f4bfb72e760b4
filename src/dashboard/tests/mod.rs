//! Unit tests for the dashboard module.

mod service_tests;
