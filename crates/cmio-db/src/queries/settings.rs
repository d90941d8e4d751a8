//! Key/value settings queries.

use crate::pool::{DbPool, DbResult};
use rusqlite::{params, OptionalExtension};

/// Get a setting value.
pub fn get_setting(pool: &DbPool, key: &str) -> DbResult<Option<String>> {
    pool.with_conn(|conn| {
        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    })
}

/// Insert or replace a setting value.
pub fn set_setting(pool: &DbPool, key: &str, value: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    })
}
