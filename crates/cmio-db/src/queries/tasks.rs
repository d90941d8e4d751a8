//! Task and checklist step queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension, Row};

/// Task row from database.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub id: i64,
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub assignee_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub estimated_minutes: Option<i64>,
    pub created_at: String,
    pub status: String,
}

/// Task step row from database.
#[derive(Debug, Clone)]
pub struct TaskStepRow {
    pub id: i64,
    pub task_id: i64,
    pub description: String,
    pub estimated_minutes: Option<i64>,
    pub completed: bool,
    pub order_index: i64,
}

const TASK_COLUMNS: &str = "t.id, t.client_id, c.first_name || ' ' || c.last_name,
    t.assignee_id, t.title, t.description, t.due_date, t.estimated_minutes,
    t.created_at, t.status";

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: row.get(0)?,
        client_id: row.get(1)?,
        client_name: row.get(2)?,
        assignee_id: row.get(3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        due_date: row.get(6)?,
        estimated_minutes: row.get(7)?,
        created_at: row.get(8)?,
        status: row.get(9)?,
    })
}

fn step_from_row(row: &Row<'_>) -> rusqlite::Result<TaskStepRow> {
    Ok(TaskStepRow {
        id: row.get(0)?,
        task_id: row.get(1)?,
        description: row.get(2)?,
        estimated_minutes: row.get(3)?,
        completed: row.get(4)?,
        order_index: row.get(5)?,
    })
}

/// Get a task by ID.
pub fn get_task(pool: &DbPool, id: i64) -> DbResult<TaskRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!(
                "SELECT {TASK_COLUMNS}
                 FROM tasks t LEFT JOIN clients c ON c.id = t.client_id
                 WHERE t.id = ?1"
            ),
            params![id],
            task_from_row,
        )
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("Task: {}", id)))
    })
}

/// List all tasks, oldest first.
pub fn list_tasks(pool: &DbPool) -> DbResult<Vec<TaskRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS}
             FROM tasks t LEFT JOIN clients c ON c.id = t.client_id
             ORDER BY t.id"
        ))?;

        let rows = stmt.query_map([], task_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Count all tasks.
pub fn count_tasks(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count)
    })
}

/// List the steps of a task in checklist order.
pub fn list_steps(pool: &DbPool, task_id: i64) -> DbResult<Vec<TaskStepRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, task_id, description, estimated_minutes, completed, order_index
             FROM task_steps WHERE task_id = ?1
             ORDER BY order_index, id",
        )?;

        let rows = stmt.query_map(params![task_id], step_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Flip the completed flag of the step at `index` (zero-based, checklist order).
///
/// Returns the new flag, or `None` when the index is out of range.
pub fn toggle_step(pool: &DbPool, task_id: i64, index: usize) -> DbResult<Option<bool>> {
    let Ok(offset) = i64::try_from(index) else {
        return Ok(None);
    };

    pool.transaction(|tx| {
        let step: Option<(i64, bool)> = tx
            .query_row(
                "SELECT id, completed FROM task_steps WHERE task_id = ?1
                 ORDER BY order_index, id LIMIT 1 OFFSET ?2",
                params![task_id, offset],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((step_id, completed)) = step else {
            return Ok(None);
        };

        tx.execute(
            "UPDATE task_steps SET completed = ?1 WHERE id = ?2",
            params![!completed, step_id],
        )?;
        Ok(Some(!completed))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::seeded_pool;

    #[test]
    fn test_list_tasks_and_steps() {
        let pool = seeded_pool();
        let tasks = list_tasks(&pool).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Prep SNAP application");
        assert_eq!(tasks[0].estimated_minutes, Some(25));
        assert_eq!(tasks[1].client_name.as_deref(), Some("Lee Chen"));

        let steps = list_steps(&pool, 2).unwrap();
        assert_eq!(steps.len(), 2);
        assert!(steps[0].completed);
        assert!(!steps[1].completed);
    }

    #[test]
    fn test_toggle_step() {
        let pool = seeded_pool();
        assert_eq!(toggle_step(&pool, 1, 1).unwrap(), Some(true));
        assert_eq!(toggle_step(&pool, 1, 1).unwrap(), Some(false));
        assert_eq!(toggle_step(&pool, 1, 2).unwrap(), None);
        assert_eq!(toggle_step(&pool, 9, 0).unwrap(), None);
    }

    #[test]
    fn test_missing_task() {
        let pool = seeded_pool();
        assert!(matches!(get_task(&pool, 3), Err(DbError::NotFound(_))));
        assert_eq!(count_tasks(&pool).unwrap(), 2);
    }
}
