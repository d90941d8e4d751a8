//! Task checklist handlers.

use axum::{
    extract::{Path, State},
    response::Response,
};

use super::redirect_home;
use crate::state::AppState;

/// POST /tasks/{task_id}/steps/{step_index}/toggle - Check or uncheck a step.
pub async fn toggle_step(
    State(state): State<AppState>,
    Path((task_id, step_index)): Path<(i64, usize)>,
) -> Response {
    let result = cmio_core::task::toggle_step(&state.db, task_id, step_index);
    redirect_home("toggle_step", result)
}
