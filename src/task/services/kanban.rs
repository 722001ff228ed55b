//! Kanban projection of task collections.

use serde::Serialize;

use crate::task::domain::{Task, TaskStatus};

/// Tasks grouped into the four board lanes.
///
/// Every lane is always present, even when empty, so rendering code
/// never has to special-case missing columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KanbanBoard {
    /// Lane for [`TaskStatus::Pending`].
    pub pending: Vec<Task>,
    /// Lane for [`TaskStatus::InProgress`].
    pub in_progress: Vec<Task>,
    /// Lane for [`TaskStatus::Review`].
    pub review: Vec<Task>,
    /// Lane for [`TaskStatus::Done`].
    pub done: Vec<Task>,
}

impl KanbanBoard {
    /// Total number of tasks across all lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + self.in_progress.len() + self.review.len() + self.done.len()
    }

    /// Whether every lane is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Distributes `tasks` into board lanes, preserving input order within
/// each lane. The projection is pure: same input, same board.
#[must_use]
pub fn project_board(tasks: Vec<Task>) -> KanbanBoard {
    let mut board = KanbanBoard::default();
    for task in tasks {
        match task.status() {
            TaskStatus::Pending => board.pending.push(task),
            TaskStatus::InProgress => board.in_progress.push(task),
            TaskStatus::Review => board.review.push(task),
            TaskStatus::Done => board.done.push(task),
        }
    }
    board
}
