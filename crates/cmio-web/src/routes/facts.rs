//! Fact review handlers.

use axum::{
    extract::{Path, State},
    response::Response,
};

use super::redirect_home;
use crate::state::AppState;

/// POST /pending-facts/{fact_id}/{action} - Approve or reject a fact.
pub async fn review_fact(
    State(state): State<AppState>,
    Path((fact_id, action)): Path<(i64, String)>,
) -> Response {
    let result = cmio_core::fact::review_fact(&state.db, fact_id, &action, state.acting_user_id);
    redirect_home("review_fact", result)
}
