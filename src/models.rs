//! Data model for persisted task status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cell of the weekly grid: a task's completion status on one date.
///
/// Identity is the composite (`task_name`, `task_date`); storage holds at
/// most one record per pair. Records are created unchecked the first time
/// their week is viewed and are mutated only by toggle reconciliation,
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusRecord {
    /// Name of the task, as configured in the task list.
    pub task_name: String,
    /// Calendar date this status applies to.
    pub task_date: NaiveDate,
    /// Whether the task was completed on that date.
    pub done: bool,
}

impl TaskStatusRecord {
    /// Create an unchecked record for a (task, date) pair.
    #[must_use]
    pub const fn unchecked(task_name: String, task_date: NaiveDate) -> Self {
        Self { task_name, task_date, done: false }
    }

    /// Check whether this record is keyed by the given pair.
    #[must_use]
    pub fn is_for(&self, task_name: &str, task_date: NaiveDate) -> bool {
        self.task_name == task_name && self.task_date == task_date
    }
}
