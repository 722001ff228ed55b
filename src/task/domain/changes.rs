//! Field deltas recorded in a task commit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::org::domain::ScopeSet;

use super::commit::CommitHash;
use super::patch::FieldUpdate;
use super::task::{Task, TaskPriority, TaskStatus, VisibilityScope};

/// The fields one commit touched, with the values they were set to.
///
/// Only touched fields are serialized; nullable fields that were cleared
/// serialize as explicit `null`. The set participates in the commit
/// digest, so its serialized form must stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// New title, when retitled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, or an explicit clear.
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub description: FieldUpdate<String>,
    /// New priority, when reprioritized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// New visibility scope, when rescoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_scope: Option<VisibilityScope>,
    /// New deadline, or an explicit clear.
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub deadline: FieldUpdate<DateTime<Utc>>,
    /// New status, for status moves and reverts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Personal flag, recorded once on the initial commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_personal: Option<bool>,
    /// Assignment set, recorded on the initial commit of directed tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<ScopeSet>,
    /// Hash of the commit a revert restored, on revert commits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revert_to: Option<CommitHash>,
}

impl ChangeSet {
    /// A delta that touches nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: FieldUpdate::Keep,
            priority: None,
            visibility_scope: None,
            deadline: FieldUpdate::Keep,
            status: None,
            is_personal: None,
            assignees: None,
            revert_to: None,
        }
    }

    /// Records the full field state of a freshly created task.
    #[must_use]
    pub fn for_creation(task: &Task) -> Self {
        let mut changes = Self {
            title: Some(task.title().to_owned()),
            status: Some(task.status()),
            priority: Some(task.priority()),
            visibility_scope: Some(task.visibility_scope()),
            is_personal: Some(task.is_personal()),
            ..Self::new()
        };
        if let Some(description) = task.description() {
            changes.description = FieldUpdate::Set(description.to_owned());
        }
        if let Some(deadline) = task.deadline() {
            changes.deadline = FieldUpdate::Set(deadline);
        }
        if !task.is_personal() {
            changes.assignees = Some(task.assignees().clone());
        }
        changes
    }

    /// Whether the delta touches no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_keep()
            && self.priority.is_none()
            && self.visibility_scope.is_none()
            && self.deadline.is_keep()
            && self.status.is_none()
            && self.is_personal.is_none()
            && self.assignees.is_none()
            && self.revert_to.is_none()
    }
}
