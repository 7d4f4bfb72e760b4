//! Unit tests for the catalog module.

mod domain_tests;
