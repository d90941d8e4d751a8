//! Pending and approved fact queries.

use crate::pool::{now, DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension, Row};

/// Pending fact row from database.
#[derive(Debug, Clone)]
pub struct PendingFactRow {
    pub id: i64,
    pub client_id: i64,
    pub client_name: String,
    pub source_message_id: i64,
    pub fact_type: String,
    pub fact_value: String,
    pub security_rating: String,
    pub status: String,
    pub created_at: String,
    pub reviewed_at: Option<String>,
    pub reviewer_id: Option<i64>,
}

/// Approved client fact row from database.
#[derive(Debug, Clone)]
pub struct ClientFactRow {
    pub id: i64,
    pub client_id: i64,
    pub pending_fact_id: Option<i64>,
    pub fact_type: String,
    pub fact_value: String,
    pub security_rating: String,
    pub approved_at: String,
    pub approved_by_id: i64,
}

const PENDING_FACT_COLUMNS: &str = "f.id, f.client_id, c.first_name || ' ' || c.last_name,
    f.source_message_id, f.fact_type, f.fact_value, f.security_rating, f.status,
    f.created_at, f.reviewed_at, f.reviewer_id";

fn pending_fact_from_row(row: &Row<'_>) -> rusqlite::Result<PendingFactRow> {
    Ok(PendingFactRow {
        id: row.get(0)?,
        client_id: row.get(1)?,
        client_name: row.get(2)?,
        source_message_id: row.get(3)?,
        fact_type: row.get(4)?,
        fact_value: row.get(5)?,
        security_rating: row.get(6)?,
        status: row.get(7)?,
        created_at: row.get(8)?,
        reviewed_at: row.get(9)?,
        reviewer_id: row.get(10)?,
    })
}

/// Insert a pending fact extracted from a message.
pub fn create_pending_fact(
    pool: &DbPool,
    client_id: i64,
    source_message_id: i64,
    fact_type: &str,
    fact_value: &str,
    security_rating: &str,
) -> DbResult<i64> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO pending_facts (client_id, source_message_id, fact_type, fact_value, security_rating)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![client_id, source_message_id, fact_type, fact_value, security_rating],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Get a pending fact by ID.
pub fn get_pending_fact(pool: &DbPool, id: i64) -> DbResult<PendingFactRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!(
                "SELECT {PENDING_FACT_COLUMNS}
                 FROM pending_facts f JOIN clients c ON c.id = f.client_id
                 WHERE f.id = ?1"
            ),
            params![id],
            pending_fact_from_row,
        )
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("Pending fact: {}", id)))
    })
}

/// List every pending fact regardless of status, oldest first.
pub fn list_pending_facts(pool: &DbPool) -> DbResult<Vec<PendingFactRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {PENDING_FACT_COLUMNS}
             FROM pending_facts f JOIN clients c ON c.id = f.client_id
             ORDER BY f.id"
        ))?;

        let rows = stmt.query_map([], pending_fact_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Count facts in a given status.
pub fn count_by_status(pool: &DbPool, status: &str) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM pending_facts WHERE status = ?1",
            params![status],
            |row| row.get(0),
        )?;
        Ok(count)
    })
}

/// Move a pending fact to a review outcome.
///
/// Only facts still in `pending` are updated. Approval also records the
/// client fact; the `(client, type, value)` uniqueness constraint absorbs
/// duplicates. Returns `false` when the fact was not pending.
pub fn review_pending_fact(
    pool: &DbPool,
    id: i64,
    status: &str,
    reviewer_id: i64,
) -> DbResult<bool> {
    let reviewed_at = now();

    pool.transaction(|tx| {
        let updated = tx.execute(
            "UPDATE pending_facts SET status = ?1, reviewed_at = ?2, reviewer_id = ?3
             WHERE id = ?4 AND status = 'pending'",
            params![status, reviewed_at, reviewer_id, id],
        )?;
        if updated == 0 {
            return Ok(false);
        }

        if status == "approved" {
            tx.execute(
                "INSERT OR IGNORE INTO client_facts
                    (client_id, pending_fact_id, fact_type, fact_value, security_rating, approved_at, approved_by_id)
                 SELECT client_id, id, fact_type, fact_value, security_rating, ?1, ?2
                 FROM pending_facts WHERE id = ?3",
                params![reviewed_at, reviewer_id, id],
            )?;
        }
        Ok(true)
    })
}

/// List approved facts for a client.
pub fn list_client_facts(pool: &DbPool, client_id: i64) -> DbResult<Vec<ClientFactRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, client_id, pending_fact_id, fact_type, fact_value, security_rating,
                    approved_at, approved_by_id
             FROM client_facts WHERE client_id = ?1
             ORDER BY id",
        )?;

        let rows = stmt.query_map(params![client_id], |row| {
            Ok(ClientFactRow {
                id: row.get(0)?,
                client_id: row.get(1)?,
                pending_fact_id: row.get(2)?,
                fact_type: row.get(3)?,
                fact_value: row.get(4)?,
                security_rating: row.get(5)?,
                approved_at: row.get(6)?,
                approved_by_id: row.get(7)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}
