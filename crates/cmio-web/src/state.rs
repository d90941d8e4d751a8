//! Application state.

use cmio_db::DbPool;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    /// User recorded as reviewer when facts are approved or rejected.
    pub acting_user_id: i64,
    /// Refuse model selections outside the known options.
    pub strict_models: bool,
}

impl AppState {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            db,
            acting_user_id: 1,
            strict_models: false,
        }
    }

    pub fn with_acting_user(mut self, user_id: i64) -> Self {
        self.acting_user_id = user_id;
        self
    }

    pub fn with_strict_models(mut self, strict: bool) -> Self {
        self.strict_models = strict;
        self
    }
}
