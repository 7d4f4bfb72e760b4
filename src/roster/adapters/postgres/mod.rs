//! `PostgreSQL` adapter for the roster port.

mod models;
mod repository;
