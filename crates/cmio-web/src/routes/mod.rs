//! Route handlers.

pub mod dashboard;
pub mod facts;
pub mod model;
pub mod notes;
pub mod tasks;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use cmio_core::{CmioError, CmioResult};
use tracing::{debug, error};

/// Answer a mutation with a redirect to the dashboard.
///
/// Unknown records, unknown actions and disallowed transitions are absorbed
/// and logged; only storage failures and refused model selections surface.
pub(crate) fn redirect_home<T>(operation: &'static str, result: CmioResult<T>) -> Response {
    match result {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) if e.is_no_op() => {
            debug!(operation, error = %e, "Request left the store unchanged");
            Redirect::to("/").into_response()
        }
        Err(e @ CmioError::InvalidModel(_)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Html(format!("Error: {}", e))).into_response()
        }
        Err(e) => {
            error!(operation, error = %e, "Request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Error: {}", e))).into_response()
        }
    }
}
