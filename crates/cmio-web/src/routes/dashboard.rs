//! Dashboard page handler.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::state::AppState;
use cmio_core::dashboard::{self, model::DashboardSnapshot};
use cmio_core::fact::model::{FactStatus, PendingFact};
use cmio_core::note::model::{CaseNote, EncounterNote, NoteStatus};
use cmio_core::task::model::Task;

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    pending_facts: i64,
    draft_notes: i64,
    open_tasks: i64,
    facts: Vec<FactView>,
    notes: Vec<NoteView>,
    case_notes: Vec<CaseNoteView>,
    tasks: Vec<TaskView>,
    messages: Vec<MessageView>,
    models: Vec<ModelView>,
    selected_model: String,
}

struct FactView {
    id: i64,
    client: String,
    value: String,
    security: &'static str,
    status: &'static str,
    reviewable: bool,
}

impl FactView {
    fn from_fact(fact: &PendingFact) -> Self {
        Self {
            id: fact.id,
            client: fact.client_name.clone(),
            value: fact.value.clone(),
            security: fact.security.as_str(),
            status: fact.status.as_str(),
            reviewable: fact.status == FactStatus::Pending,
        }
    }
}

struct NoteView {
    id: i64,
    client: String,
    summary: String,
    details: String,
    status: &'static str,
    can_submit: bool,
    can_promote: bool,
    can_reject: bool,
}

impl NoteView {
    fn from_note(note: &EncounterNote) -> Self {
        Self {
            id: note.id,
            client: note.client_name.clone(),
            summary: note.summary.clone(),
            details: note.details.clone(),
            status: note.status.as_str(),
            can_submit: note.status.can_transition_to(&NoteStatus::ReadyForApproval),
            can_promote: note.status.can_transition_to(&NoteStatus::Approved),
            can_reject: note.status.can_transition_to(&NoteStatus::Rejected),
        }
    }
}

struct CaseNoteView {
    id: i64,
    client: String,
    body: String,
    finalized_at: String,
}

impl CaseNoteView {
    fn from_case_note(case_note: &CaseNote) -> Self {
        Self {
            id: case_note.id,
            client: case_note.client_name.clone(),
            body: case_note.body.clone(),
            finalized_at: case_note.finalized_at.clone(),
        }
    }
}

struct TaskView {
    id: i64,
    title: String,
    client: String,
    estimate: String,
    progress: String,
    steps: Vec<StepView>,
}

struct StepView {
    index: usize,
    label: String,
    done: bool,
}

impl TaskView {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            client: task.client_name.clone().unwrap_or_default(),
            estimate: task
                .estimated_minutes
                .map(|m| format!("{} min", m))
                .unwrap_or_default(),
            progress: format!("{}/{}", task.completed_steps(), task.steps.len()),
            steps: task
                .steps
                .iter()
                .enumerate()
                .map(|(index, step)| StepView {
                    index,
                    label: step.description.clone(),
                    done: step.completed,
                })
                .collect(),
        }
    }
}

struct MessageView {
    kind: &'static str,
    sender: String,
    channel: String,
    clients: String,
    body: String,
}

struct ModelView {
    id: &'static str,
    label: &'static str,
    latency: &'static str,
    selected: bool,
}

impl DashboardTemplate {
    fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        Self {
            pending_facts: snapshot.stats.pending_facts,
            draft_notes: snapshot.stats.draft_notes,
            open_tasks: snapshot.stats.open_tasks,
            facts: snapshot.pending_facts.iter().map(FactView::from_fact).collect(),
            notes: snapshot.encounter_notes.iter().map(NoteView::from_note).collect(),
            case_notes: snapshot
                .case_notes
                .iter()
                .map(CaseNoteView::from_case_note)
                .collect(),
            tasks: snapshot.tasks.iter().map(TaskView::from_task).collect(),
            messages: snapshot
                .messages
                .iter()
                .map(|m| MessageView {
                    kind: m.message_type.as_str(),
                    sender: m.sender.clone(),
                    channel: m.channel.clone().unwrap_or_default(),
                    clients: m.clients.join(", "),
                    body: m.body.clone(),
                })
                .collect(),
            models: snapshot
                .model_options
                .iter()
                .map(|o| ModelView {
                    id: o.id,
                    label: o.label,
                    latency: o.latency,
                    selected: o.id == snapshot.selected_model,
                })
                .collect(),
            selected_model: snapshot.selected_model.clone(),
        }
    }
}

// ============================================================
// HANDLERS
// ============================================================

/// GET / - Render the dashboard.
pub async fn index(State(state): State<AppState>) -> Response {
    let snapshot = match dashboard::get_snapshot(&state.db) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read dashboard state");
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Error: {}", e))).into_response();
        }
    };

    match DashboardTemplate::from_snapshot(&snapshot).render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Template error: {}", e))).into_response(),
    }
}
