//! `PostgreSQL` adapter for the warning port.

mod models;
mod repository;
