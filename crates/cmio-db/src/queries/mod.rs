//! Database query implementations.

pub mod facts;
pub mod messages;
pub mod model_runs;
pub mod notes;
pub mod settings;
pub mod tasks;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::pool::DbPool;

    /// A migrated, seeded in-memory pool.
    pub fn seeded_pool() -> DbPool {
        crate::init_memory_pool().unwrap()
    }
}
