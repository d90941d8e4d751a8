//! User queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension};

/// User row from database.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub full_name: String,
}

/// Get a user by ID.
pub fn get_user(pool: &DbPool, id: i64) -> DbResult<UserRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, email, full_name FROM users WHERE id = ?1",
            params![id],
            |row| {
                Ok(UserRow {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    full_name: row.get(2)?,
                })
            },
        )
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("User: {}", id)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::seeded_pool;

    #[test]
    fn test_get_user() {
        let pool = seeded_pool();
        let user = get_user(&pool, 2).unwrap();
        assert_eq!(user.full_name, "Jordan RN");
        assert!(matches!(get_user(&pool, 99), Err(DbError::NotFound(_))));
    }
}
