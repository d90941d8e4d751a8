//! Encounter note handlers.

use axum::{
    extract::{Path, State},
    response::Response,
};

use super::redirect_home;
use crate::state::AppState;

/// POST /notes/{note_id}/promote - Approve a note into a case note.
pub async fn promote_note(State(state): State<AppState>, Path(note_id): Path<i64>) -> Response {
    redirect_home("promote_note", cmio_core::note::promote_note(&state.db, note_id))
}

/// POST /notes/{note_id}/submit - Mark a draft as ready for approval.
pub async fn submit_note(State(state): State<AppState>, Path(note_id): Path<i64>) -> Response {
    redirect_home("submit_note", cmio_core::note::submit_note(&state.db, note_id))
}

/// POST /notes/{note_id}/reject - Reject a note.
pub async fn reject_note(State(state): State<AppState>, Path(note_id): Path<i64>) -> Response {
    redirect_home("reject_note", cmio_core::note::reject_note(&state.db, note_id))
}
