//! CMIO Database Layer
//!
//! SQLite persistence for the care coordination dashboard: the relational
//! schema, a connection pool guarded by a single lock, row-level queries and
//! the sample records the dashboard starts with.

pub mod migrations;
pub mod pool;
pub mod queries;
pub mod seed;

pub use migrations::{run_migrations, SCHEMA};
pub use pool::{DbError, DbPool, DbResult};

use std::path::Path;

/// Open (or create) a database file, migrate it and seed sample data if empty.
pub fn init_pool(path: &Path) -> DbResult<DbPool> {
    let pool = DbPool::open(path)?;
    run_migrations(&pool)?;
    seed::seed_sample_data(&pool)?;
    Ok(pool)
}

/// Create a migrated and seeded in-memory database.
///
/// All state lives for as long as the pool; dropping it discards every mutation.
pub fn init_memory_pool() -> DbResult<DbPool> {
    let pool = DbPool::in_memory()?;
    run_migrations(&pool)?;
    seed::seed_sample_data(&pool)?;
    Ok(pool)
}
