//! Task domain models.

use cmio_db::queries::tasks::{TaskRow, TaskStepRow};
use serde::{Deserialize, Serialize};

/// A care coordination task with its checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub assignee_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub estimated_minutes: Option<i64>,
    pub status: String,
    pub created_at: String,
    pub steps: Vec<TaskStep>,
}

impl Task {
    /// Create a Task from a database row and its ordered steps.
    pub fn from_row(row: TaskRow, steps: Vec<TaskStepRow>) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            client_name: row.client_name,
            assignee_id: row.assignee_id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            estimated_minutes: row.estimated_minutes,
            status: row.status,
            created_at: row.created_at,
            steps: steps.into_iter().map(TaskStep::from_row).collect(),
        }
    }

    /// Number of checked-off steps.
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }
}

/// One checklist item of a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStep {
    pub id: i64,
    pub description: String,
    pub estimated_minutes: Option<i64>,
    pub completed: bool,
    pub order_index: i64,
}

impl TaskStep {
    pub fn from_row(row: TaskStepRow) -> Self {
        Self {
            id: row.id,
            description: row.description,
            estimated_minutes: row.estimated_minutes,
            completed: row.completed,
            order_index: row.order_index,
        }
    }
}
