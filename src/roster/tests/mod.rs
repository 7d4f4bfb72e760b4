//! Unit tests for the roster module.
