//! PostgreSQL connection pool initialization.
//!
//! The connection string is read from `DATABASE_URL`. The returned pool is
//! cheaply cloneable and is created once at startup, then carried in the
//! application state for the lifetime of the process.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the connection cannot be
/// established; there is no useful way to serve requests without a store.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
