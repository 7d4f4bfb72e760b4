//! `PostgreSQL` adapter for the assignment port.

mod models;
mod repository;
