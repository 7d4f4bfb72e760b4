//! `PostgreSQL` store over a Diesel r2d2 pool.

pub(crate) mod schema;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed store implementing every repository port.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs a Diesel closure on the blocking pool with a pooled connection.
    pub(crate) async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreAccessError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreAccessError::from)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreAccessError::from)?
    }
}

/// Failures reaching the database before a query runs.
#[derive(Debug, Error)]
pub enum StoreAccessError {
    /// No pooled connection could be obtained.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The blocking task panicked or was cancelled.
    #[error("blocking database task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
