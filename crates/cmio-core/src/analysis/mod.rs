//! Analysis model selection and run bookkeeping.

pub mod model;

use crate::error::{CmioError, CmioResult};
use cmio_db::queries::{model_runs, settings};
use cmio_db::DbPool;
use model::{find_option, ModelRun, DEFAULT_MODEL};

const SELECTED_MODEL_KEY: &str = "selected_model";

/// The currently selected analysis model.
pub fn get_selected_model(pool: &DbPool) -> CmioResult<String> {
    Ok(settings::get_setting(pool, SELECTED_MODEL_KEY)?.unwrap_or_else(|| DEFAULT_MODEL.to_string()))
}

/// Select an analysis model.
///
/// The value is stored verbatim. With `strict` set, values outside the known
/// options are refused with [`CmioError::InvalidModel`].
pub fn select_model(pool: &DbPool, model: &str, strict: bool) -> CmioResult<String> {
    if find_option(model).is_none() {
        if strict {
            return Err(CmioError::InvalidModel(model.to_string()));
        }
        tracing::warn!(model, "Selected model is not a known option");
    }

    settings::set_setting(pool, SELECTED_MODEL_KEY, model)?;
    tracing::info!(model, "Analysis model selected");
    Ok(model.to_string())
}

/// Record the start of a model run over a message or fact.
pub fn start_run(
    pool: &DbPool,
    model_name: &str,
    version: &str,
    message_id: Option<i64>,
    pending_fact_id: Option<i64>,
) -> CmioResult<i64> {
    Ok(model_runs::start_run(pool, model_name, version, message_id, pending_fact_id)?)
}

/// Mark a model run as finished.
pub fn complete_run(pool: &DbPool, run_id: i64, success: bool) -> CmioResult<()> {
    model_runs::complete_run(pool, run_id, success)?;
    Ok(())
}

/// List model runs, newest first.
pub fn list_runs(pool: &DbPool) -> CmioResult<Vec<ModelRun>> {
    let rows = model_runs::list_runs(pool)?;
    Ok(rows.into_iter().map(ModelRun::from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded_pool;

    #[test]
    fn test_default_selection() {
        let pool = seeded_pool();
        assert_eq!(get_selected_model(&pool).unwrap(), "pattern");
    }

    #[test]
    fn test_select_known_model() {
        let pool = seeded_pool();
        select_model(&pool, "local-llm", false).unwrap();
        assert_eq!(get_selected_model(&pool).unwrap(), "local-llm");
    }

    #[test]
    fn test_unknown_model_accepted_verbatim() {
        let pool = seeded_pool();
        select_model(&pool, "gpt-from-the-hallway ", false).unwrap();
        assert_eq!(get_selected_model(&pool).unwrap(), "gpt-from-the-hallway ");
    }

    #[test]
    fn test_strict_mode_rejects_unknown_model() {
        let pool = seeded_pool();
        assert!(matches!(
            select_model(&pool, "mystery", true),
            Err(CmioError::InvalidModel(_))
        ));
        assert_eq!(get_selected_model(&pool).unwrap(), "pattern");

        select_model(&pool, "private-llm", true).unwrap();
        assert_eq!(get_selected_model(&pool).unwrap(), "private-llm");
    }

    #[test]
    fn test_model_runs() {
        let pool = seeded_pool();
        let run = start_run(&pool, "pattern", "0.3.1", Some(2), Some(2)).unwrap();
        complete_run(&pool, run, true).unwrap();

        let runs = list_runs(&pool).unwrap();
        assert_eq!(runs.len(), 1);
        assert!(runs[0].is_finished());
        assert!(runs[0].success);
        assert_eq!(runs[0].pending_fact_id, Some(2));
    }
}
