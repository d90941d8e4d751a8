//! Encounter note and case note queries.

use crate::pool::{now, DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension, Row};

/// Encounter note row from database.
#[derive(Debug, Clone)]
pub struct EncounterNoteRow {
    pub id: i64,
    pub client_id: i64,
    pub client_name: String,
    pub source_message_id: Option<i64>,
    pub author_id: i64,
    pub author_name: String,
    pub summary: String,
    pub details: String,
    pub note_type: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Case note row from database.
#[derive(Debug, Clone)]
pub struct CaseNoteRow {
    pub id: i64,
    pub encounter_note_id: i64,
    pub client_id: i64,
    pub client_name: String,
    pub author_id: i64,
    pub finalized_at: String,
    pub body: String,
}

const NOTE_COLUMNS: &str = "n.id, n.client_id, c.first_name || ' ' || c.last_name,
    n.source_message_id, n.author_id, u.full_name, n.summary, n.details, n.note_type,
    n.status, n.created_at, n.updated_at";

const NOTE_JOINS: &str = "encounter_notes n
    JOIN clients c ON c.id = n.client_id
    JOIN users u ON u.id = n.author_id";

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<EncounterNoteRow> {
    Ok(EncounterNoteRow {
        id: row.get(0)?,
        client_id: row.get(1)?,
        client_name: row.get(2)?,
        source_message_id: row.get(3)?,
        author_id: row.get(4)?,
        author_name: row.get(5)?,
        summary: row.get(6)?,
        details: row.get(7)?,
        note_type: row.get(8)?,
        status: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

/// Get an encounter note by ID.
pub fn get_note(pool: &DbPool, id: i64) -> DbResult<EncounterNoteRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM {NOTE_JOINS} WHERE n.id = ?1"),
            params![id],
            note_from_row,
        )
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("Encounter note: {}", id)))
    })
}

/// List all encounter notes, oldest first.
pub fn list_notes(pool: &DbPool) -> DbResult<Vec<EncounterNoteRow>> {
    pool.with_conn(|conn| {
        let mut stmt =
            conn.prepare(&format!("SELECT {NOTE_COLUMNS} FROM {NOTE_JOINS} ORDER BY n.id"))?;

        let rows = stmt.query_map([], note_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Count notes that have not been approved yet (including rejected ones).
pub fn count_not_approved(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM encounter_notes WHERE status != 'approved'",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    })
}

/// Set a note's status if it is currently in one of `from`.
///
/// Returns `false` when the note was not in an allowed state.
pub fn update_note_status(pool: &DbPool, id: i64, from: &[&str], to: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let current: Option<String> = conn
            .query_row(
                "SELECT status FROM encounter_notes WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        match current {
            Some(status) if from.contains(&status.as_str()) => {
                conn.execute(
                    "UPDATE encounter_notes SET status = ?1, updated_at = ?2 WHERE id = ?3",
                    params![to, now(), id],
                )?;
                Ok(true)
            }
            _ => Ok(false),
        }
    })
}

/// Approve a note and finalize it into a case note in one transaction.
///
/// The note must be `draft` or `ready_for_approval`. Returns the new case
/// note ID, or `None` when the note was not in an approvable state.
pub fn approve_note(pool: &DbPool, id: i64) -> DbResult<Option<i64>> {
    let finalized_at = now();

    pool.transaction(|tx| {
        let updated = tx.execute(
            "UPDATE encounter_notes SET status = 'approved', updated_at = ?1
             WHERE id = ?2 AND status IN ('draft', 'ready_for_approval')",
            params![finalized_at, id],
        )?;
        if updated == 0 {
            return Ok(None);
        }

        tx.execute(
            "INSERT INTO case_notes (encounter_note_id, client_id, author_id, finalized_at, body)
             SELECT id, client_id, author_id, ?1, details FROM encounter_notes WHERE id = ?2",
            params![finalized_at, id],
        )?;
        Ok(Some(tx.last_insert_rowid()))
    })
}

const CASE_NOTE_COLUMNS: &str = "cn.id, cn.encounter_note_id, cn.client_id,
    c.first_name || ' ' || c.last_name, cn.author_id, cn.finalized_at, cn.body";

fn case_note_from_row(row: &Row<'_>) -> rusqlite::Result<CaseNoteRow> {
    Ok(CaseNoteRow {
        id: row.get(0)?,
        encounter_note_id: row.get(1)?,
        client_id: row.get(2)?,
        client_name: row.get(3)?,
        author_id: row.get(4)?,
        finalized_at: row.get(5)?,
        body: row.get(6)?,
    })
}

/// Get a case note by ID.
pub fn get_case_note(pool: &DbPool, id: i64) -> DbResult<CaseNoteRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!(
                "SELECT {CASE_NOTE_COLUMNS}
                 FROM case_notes cn JOIN clients c ON c.id = cn.client_id
                 WHERE cn.id = ?1"
            ),
            params![id],
            case_note_from_row,
        )
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("Case note: {}", id)))
    })
}

/// List finalized case notes, oldest first.
pub fn list_case_notes(pool: &DbPool) -> DbResult<Vec<CaseNoteRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {CASE_NOTE_COLUMNS}
             FROM case_notes cn JOIN clients c ON c.id = cn.client_id
             ORDER BY cn.id"
        ))?;

        let rows = stmt.query_map([], case_note_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Delete an encounter note (its case note cascades).
pub fn delete_note(pool: &DbPool, id: i64) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let deleted = conn.execute("DELETE FROM encounter_notes WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    })
}
