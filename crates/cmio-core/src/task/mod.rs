//! Task checklists.

pub mod model;

use crate::error::{CmioError, CmioResult};
use cmio_db::queries::tasks as queries;
use cmio_db::{DbError, DbPool};
use model::Task;

/// Get a task with its steps.
pub fn get_task(pool: &DbPool, id: i64) -> CmioResult<Task> {
    let row = match queries::get_task(pool, id) {
        Ok(row) => row,
        Err(DbError::NotFound(_)) => return Err(CmioError::TaskNotFound(id)),
        Err(e) => return Err(e.into()),
    };
    let steps = queries::list_steps(pool, id)?;
    Ok(Task::from_row(row, steps))
}

/// List all tasks with their steps.
pub fn list_tasks(pool: &DbPool) -> CmioResult<Vec<Task>> {
    let rows = queries::list_tasks(pool)?;
    let mut tasks = Vec::with_capacity(rows.len());
    for row in rows {
        let steps = queries::list_steps(pool, row.id)?;
        tasks.push(Task::from_row(row, steps));
    }
    Ok(tasks)
}

/// Number of tasks, whatever their status.
pub fn count_tasks(pool: &DbPool) -> CmioResult<i64> {
    Ok(queries::count_tasks(pool)?)
}

/// Flip the completed flag of a task step (zero-based, checklist order).
///
/// Returns the new flag.
pub fn toggle_step(pool: &DbPool, task_id: i64, index: usize) -> CmioResult<bool> {
    match queries::toggle_step(pool, task_id, index)? {
        Some(completed) => {
            tracing::debug!(task_id, index, completed, "Task step toggled");
            Ok(completed)
        }
        None => {
            let task = get_task(pool, task_id)?;
            Err(CmioError::StepOutOfRange {
                task_id,
                index,
                len: task.steps.len(),
            })
        }
    }
}
