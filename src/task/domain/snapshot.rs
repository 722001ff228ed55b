//! Point-in-time captures of revertable task state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::{Task, TaskStatus, VisibilityScope};

/// Schema version stamped into every snapshot so stored history can be
/// migrated if the captured field set ever changes.
pub const SNAPSHOT_VERSION: u16 = 1;

/// The revertable slice of a task as it stood right after a commit.
///
/// Deliberately excludes priority, assignees and the personal flag:
/// reverting restores content and workflow position, not who the work
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    /// Schema version of this capture.
    pub version: u16,
    /// Title at capture time.
    pub title: String,
    /// Description at capture time, if any.
    pub description: Option<String>,
    /// Workflow status at capture time.
    pub status: TaskStatus,
    /// Visibility scope at capture time.
    pub visibility_scope: VisibilityScope,
    /// Deadline at capture time, if any.
    pub deadline: Option<DateTime<Utc>>,
}

impl TaskSnapshot {
    /// Captures the revertable fields of `task`.
    #[must_use]
    pub fn capture(task: &Task) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status(),
            visibility_scope: task.visibility_scope(),
            deadline: task.deadline(),
        }
    }
}
