//! Encounter notes and their promotion into case notes.

pub mod model;

use crate::error::{CmioError, CmioResult};
use cmio_db::queries::notes as queries;
use cmio_db::{DbError, DbPool};
use model::{CaseNote, EncounterNote, NoteStatus};

/// List all encounter notes.
pub fn list_notes(pool: &DbPool) -> CmioResult<Vec<EncounterNote>> {
    let rows = queries::list_notes(pool)?;
    Ok(rows.into_iter().map(EncounterNote::from_row).collect())
}

/// Get an encounter note by ID.
pub fn get_note(pool: &DbPool, id: i64) -> CmioResult<EncounterNote> {
    match queries::get_note(pool, id) {
        Ok(row) => Ok(EncounterNote::from_row(row)),
        Err(DbError::NotFound(_)) => Err(CmioError::NoteNotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// Number of notes not yet approved (drafts, ready and rejected).
pub fn count_unapproved(pool: &DbPool) -> CmioResult<i64> {
    Ok(queries::count_not_approved(pool)?)
}

/// List finalized case notes.
pub fn list_case_notes(pool: &DbPool) -> CmioResult<Vec<CaseNote>> {
    let rows = queries::list_case_notes(pool)?;
    Ok(rows.into_iter().map(CaseNote::from_row).collect())
}

fn check_transition(note: &EncounterNote, to: NoteStatus) -> CmioResult<()> {
    if note.status.can_transition_to(&to) {
        Ok(())
    } else {
        Err(CmioError::InvalidStateTransition {
            from: note.status.as_str().to_string(),
            to: to.as_str().to_string(),
        })
    }
}

/// Approve a note and create its case note.
///
/// The case note carries the note's client, author and details. Approved or
/// rejected notes cannot be promoted again.
pub fn promote_note(pool: &DbPool, id: i64) -> CmioResult<CaseNote> {
    let note = get_note(pool, id)?;
    check_transition(&note, NoteStatus::Approved)?;

    let case_note_id = queries::approve_note(pool, id)?.ok_or_else(|| {
        CmioError::InvalidStateTransition {
            from: note.status.as_str().to_string(),
            to: NoteStatus::Approved.as_str().to_string(),
        }
    })?;

    tracing::info!(note_id = id, case_note_id, "Encounter note promoted to case note");

    Ok(CaseNote::from_row(queries::get_case_note(pool, case_note_id)?))
}

fn move_note(pool: &DbPool, id: i64, to: NoteStatus) -> CmioResult<EncounterNote> {
    let note = get_note(pool, id)?;
    check_transition(&note, to)?;

    if !queries::update_note_status(pool, id, &NoteStatus::sources_for(&to), to.as_str())? {
        let current = get_note(pool, id)?;
        return Err(CmioError::InvalidStateTransition {
            from: current.status.as_str().to_string(),
            to: to.as_str().to_string(),
        });
    }

    tracing::info!(note_id = id, status = to.as_str(), "Encounter note status changed");
    get_note(pool, id)
}

/// Mark a draft note as ready for approval.
pub fn submit_note(pool: &DbPool, id: i64) -> CmioResult<EncounterNote> {
    move_note(pool, id, NoteStatus::ReadyForApproval)
}

/// Reject a note that has not been approved.
pub fn reject_note(pool: &DbPool, id: i64) -> CmioResult<EncounterNote> {
    move_note(pool, id, NoteStatus::Rejected)
}
