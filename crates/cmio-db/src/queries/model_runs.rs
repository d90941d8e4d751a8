//! Model run bookkeeping queries.

use crate::pool::{now, DbError, DbPool, DbResult};
use rusqlite::params;

/// Model run row from database.
#[derive(Debug, Clone)]
pub struct ModelRunRow {
    pub id: i64,
    pub model_name: String,
    pub version: String,
    pub started_at: String,
    pub completed_at: Option<String>,
    pub success: bool,
    pub message_id: Option<i64>,
    pub pending_fact_id: Option<i64>,
}

/// Record the start of a model run.
pub fn start_run(
    pool: &DbPool,
    model_name: &str,
    version: &str,
    message_id: Option<i64>,
    pending_fact_id: Option<i64>,
) -> DbResult<i64> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO model_runs (model_name, version, started_at, message_id, pending_fact_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![model_name, version, now(), message_id, pending_fact_id],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Mark a run as finished.
pub fn complete_run(pool: &DbPool, id: i64, success: bool) -> DbResult<()> {
    pool.with_conn(|conn| {
        let updated = conn.execute(
            "UPDATE model_runs SET completed_at = ?1, success = ?2
             WHERE id = ?3 AND completed_at IS NULL",
            params![now(), success, id],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(format!("Open model run: {}", id)));
        }
        Ok(())
    })
}

/// List runs, newest first.
pub fn list_runs(pool: &DbPool) -> DbResult<Vec<ModelRunRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, model_name, version, started_at, completed_at, success,
                    message_id, pending_fact_id
             FROM model_runs ORDER BY id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(ModelRunRow {
                id: row.get(0)?,
                model_name: row.get(1)?,
                version: row.get(2)?,
                started_at: row.get(3)?,
                completed_at: row.get(4)?,
                success: row.get(5)?,
                message_id: row.get(6)?,
                pending_fact_id: row.get(7)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}
