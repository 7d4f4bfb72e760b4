//! `PostgreSQL` adapter for the catalog port.

mod models;
mod repository;
