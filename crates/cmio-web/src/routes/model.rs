//! Analysis model selection handler.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Response,
    Form,
};
use serde::Deserialize;

use super::redirect_home;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SelectModelForm {
    pub model: Option<String>,
}

/// POST /model/select - Pick the analysis model.
///
/// A request without a usable form body keeps the current selection.
pub async fn select_model(
    State(state): State<AppState>,
    form: Result<Form<SelectModelForm>, FormRejection>,
) -> Response {
    let model = match form {
        Ok(Form(form)) => form.model,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Model form missing");
            None
        }
    };

    let result = match model {
        Some(model) => cmio_core::analysis::select_model(&state.db, &model, state.strict_models),
        None => cmio_core::analysis::get_selected_model(&state.db),
    };
    redirect_home("select_model", result)
}
