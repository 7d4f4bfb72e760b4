//! `PostgreSQL` adapter for the user directory port.

mod models;
mod repository;

pub(crate) use repository::user_to_new_row;
