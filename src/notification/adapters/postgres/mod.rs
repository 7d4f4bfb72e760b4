//! `PostgreSQL` adapter for the notification port.

mod models;
mod repository;
