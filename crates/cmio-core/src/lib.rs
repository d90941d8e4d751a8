//! CMIO Core Library
//!
//! Domain models and operations for the care coordination dashboard:
//! fact review, note promotion, task checklists, analysis model selection
//! and the dashboard read path.

pub mod analysis;
pub mod dashboard;
pub mod error;
pub mod fact;
pub mod message;
pub mod note;
pub mod task;

pub use error::{CmioError, CmioResult};

#[cfg(test)]
pub(crate) mod test_support {
    use cmio_db::DbPool;

    /// A migrated, seeded in-memory pool.
    pub fn seeded_pool() -> DbPool {
        cmio_db::init_memory_pool().unwrap()
    }
}
