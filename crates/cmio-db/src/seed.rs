//! Sample records the dashboard starts with.

use crate::pool::{DbPool, DbResult};

const SAMPLE_DATA: &str = include_str!("seed.sql");

/// Insert the sample users, clients, messages, facts, notes and tasks.
///
/// Returns `false` without touching anything when the database already holds
/// users, so a persistent database is only seeded once.
pub fn seed_sample_data(pool: &DbPool) -> DbResult<bool> {
    let seeded = pool.transaction(|tx| {
        let users: i64 = tx.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        if users > 0 {
            return Ok(false);
        }
        tx.execute_batch(SAMPLE_DATA)?;
        Ok(true)
    })?;

    if seeded {
        tracing::info!("Seeded sample care coordination data");
    }
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;

    fn count(pool: &DbPool, table: &str) -> i64 {
        pool.with_conn(|conn| {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?)
        })
        .unwrap()
    }

    #[test]
    fn test_seed_inserts_sample_records() {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();

        assert!(seed_sample_data(&pool).unwrap());
        assert_eq!(count(&pool, "users"), 2);
        assert_eq!(count(&pool, "messages"), 2);
        assert_eq!(count(&pool, "pending_facts"), 2);
        assert_eq!(count(&pool, "encounter_notes"), 2);
        assert_eq!(count(&pool, "case_notes"), 0);
        assert_eq!(count(&pool, "tasks"), 2);
        assert_eq!(count(&pool, "task_steps"), 4);
    }

    #[test]
    fn test_seed_runs_once() {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();

        assert!(seed_sample_data(&pool).unwrap());
        assert!(!seed_sample_data(&pool).unwrap());
        assert_eq!(count(&pool, "pending_facts"), 2);
    }
}
