//! # Gradebook DB
//!
//! Persistence layer for the student record library: PostgreSQL pool
//! initialization, the explicit schema descriptor, migrations, and the
//! student repository.
//!
//! # Example
//!
//! ```ignore
//! use gradebook_db::{init_db_pool, run_migrations, StudentRepository};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_db_pool().await;
//!     run_migrations(&pool).await?;
//!     let student = StudentRepository::find_by_id(&pool, 1.into()).await?;
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use std::env;

pub mod schema;
pub mod students;

pub use students::StudentRepository;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool.
///
/// Reads the connection string from the `DATABASE_URL` environment variable.
/// The returned pool is cheaply cloneable and shared across async tasks.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection fails; call this
/// once at startup.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Applies the bundled migrations, bringing the schema up to date with the
/// descriptor in [`schema`].
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!()
        .run(pool)
        .await
        .context("Failed to run migrations")
}
