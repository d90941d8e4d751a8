//! Centralized error types for CMIO.

use thiserror::Error;

/// Main error type for CMIO operations.
#[derive(Error, Debug)]
pub enum CmioError {
    #[error("Pending fact not found: {0}")]
    FactNotFound(i64),

    #[error("Encounter note not found: {0}")]
    NoteNotFound(i64),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Step {index} out of range for task {task_id} ({len} steps)")]
    StepOutOfRange { task_id: i64, index: usize, len: usize },

    #[error("Invalid review action: '{0}'")]
    InvalidAction(String),

    #[error("Invalid state transition: cannot move from '{from}' to '{to}'")]
    InvalidStateTransition { from: String, to: String },

    #[error("Unknown analysis model: '{0}'")]
    InvalidModel(String),

    #[error("Database error: {0}")]
    Database(#[from] cmio_db::DbError),
}

/// Result type for CMIO operations.
pub type CmioResult<T> = Result<T, CmioError>;

impl CmioError {
    /// Whether the error describes a request the store absorbed without
    /// changing anything (unknown record, unknown action, disallowed
    /// transition, out-of-range step).
    pub fn is_no_op(&self) -> bool {
        matches!(
            self,
            Self::FactNotFound(_)
                | Self::NoteNotFound(_)
                | Self::TaskNotFound(_)
                | Self::StepOutOfRange { .. }
                | Self::InvalidAction(_)
                | Self::InvalidStateTransition { .. }
        )
    }
}
