//! Analysis model domain models.

use cmio_db::queries::model_runs::ModelRunRow;
use serde::{Deserialize, Serialize};

/// An extraction model staff can pick on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    pub id: &'static str,
    pub label: &'static str,
    pub latency: &'static str,
}

/// Known extraction models, fastest first.
pub const MODEL_OPTIONS: &[ModelOption] = &[
    ModelOption {
        id: "pattern",
        label: "Pattern/Regex (fast)",
        latency: "<1s",
    },
    ModelOption {
        id: "local-llm",
        label: "Local LLM (balanced)",
        latency: "~4s",
    },
    ModelOption {
        id: "private-llm",
        label: "Private LLM (deep)",
        latency: "~8s",
    },
];

/// Model used when nothing has been selected yet.
pub const DEFAULT_MODEL: &str = "pattern";

/// Look up a model option by ID.
pub fn find_option(id: &str) -> Option<&'static ModelOption> {
    MODEL_OPTIONS.iter().find(|option| option.id == id)
}

/// One execution of an extraction model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRun {
    pub id: i64,
    pub model_name: String,
    pub version: String,
    pub started_at: String,
    pub completed_at: Option<String>,
    pub success: bool,
    pub message_id: Option<i64>,
    pub pending_fact_id: Option<i64>,
}

impl ModelRun {
    pub fn from_row(row: ModelRunRow) -> Self {
        Self {
            id: row.id,
            model_name: row.model_name,
            version: row.version,
            started_at: row.started_at,
            completed_at: row.completed_at,
            success: row.success,
            message_id: row.message_id,
            pending_fact_id: row.pending_fact_id,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed_at.is_some()
    }
}
