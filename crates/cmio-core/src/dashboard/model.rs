//! Dashboard view models.

use serde::Serialize;

use crate::analysis::model::ModelOption;
use crate::fact::model::PendingFact;
use crate::message::model::Message;
use crate::note::model::{CaseNote, EncounterNote};
use crate::task::model::Task;

/// Headline counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Facts still awaiting review.
    pub pending_facts: i64,
    /// Notes not yet approved, rejected ones included.
    pub draft_notes: i64,
    /// Every task, whatever its status.
    pub open_tasks: i64,
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub pending_facts: Vec<PendingFact>,
    pub encounter_notes: Vec<EncounterNote>,
    pub case_notes: Vec<CaseNote>,
    pub tasks: Vec<Task>,
    pub messages: Vec<Message>,
    pub model_options: Vec<ModelOption>,
    pub selected_model: String,
}
