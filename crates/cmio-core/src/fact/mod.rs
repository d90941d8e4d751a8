//! Fact review.
//!
//! Facts are extracted from messages and sit in `pending` until a staff
//! member approves or rejects them. Both outcomes are final; approval also
//! records the fact against the client.

pub mod model;

use crate::error::{CmioError, CmioResult};
use cmio_db::queries::facts as queries;
use cmio_db::{DbError, DbPool};
use model::{ClientFact, FactStatus, PendingFact, ReviewAction};

/// List all pending facts, whatever their review status.
pub fn list_facts(pool: &DbPool) -> CmioResult<Vec<PendingFact>> {
    let rows = queries::list_pending_facts(pool)?;
    Ok(rows.into_iter().map(PendingFact::from_row).collect())
}

/// Get a pending fact by ID.
pub fn get_fact(pool: &DbPool, id: i64) -> CmioResult<PendingFact> {
    match queries::get_pending_fact(pool, id) {
        Ok(row) => Ok(PendingFact::from_row(row)),
        Err(DbError::NotFound(_)) => Err(CmioError::FactNotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// Number of facts still awaiting review.
pub fn count_pending(pool: &DbPool) -> CmioResult<i64> {
    Ok(queries::count_by_status(pool, FactStatus::Pending.as_str())?)
}

/// Apply a review action token (`approve` or `reject`) to a fact.
///
/// Nothing changes when the fact does not exist, the token is unknown or the
/// fact was already reviewed; each case is reported as its own error.
pub fn review_fact(
    pool: &DbPool,
    id: i64,
    action: &str,
    reviewer_id: i64,
) -> CmioResult<PendingFact> {
    let fact = get_fact(pool, id)?;
    let action = ReviewAction::from_str(action)
        .ok_or_else(|| CmioError::InvalidAction(action.to_string()))?;
    let target = action.target_status();

    if !fact.status.can_transition_to(&target) {
        return Err(CmioError::InvalidStateTransition {
            from: fact.status.as_str().to_string(),
            to: target.as_str().to_string(),
        });
    }

    if !queries::review_pending_fact(pool, id, target.as_str(), reviewer_id)? {
        // Reviewed by someone else between the read and the update.
        let current = get_fact(pool, id)?;
        return Err(CmioError::InvalidStateTransition {
            from: current.status.as_str().to_string(),
            to: target.as_str().to_string(),
        });
    }

    tracing::info!(fact_id = id, status = target.as_str(), reviewer_id, "Fact reviewed");
    get_fact(pool, id)
}

/// List facts recorded against a client through approval.
pub fn list_client_facts(pool: &DbPool, client_id: i64) -> CmioResult<Vec<ClientFact>> {
    let rows = queries::list_client_facts(pool, client_id)?;
    Ok(rows.into_iter().map(ClientFact::from_row).collect())
}
