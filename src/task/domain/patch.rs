//! Partial task updates with absent / null / value semantics.
//!
//! JSON patches distinguish a field that is missing (leave it alone) from
//! one that is explicitly `null` (clear it). [`FieldUpdate`] keeps that
//! distinction; plain `Option` would collapse it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::task::{TaskPriority, VisibilityScope};

/// One field position in a patch: untouched, cleared, or replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Field was absent from the patch; keep the current value.
    #[default]
    Keep,
    /// Field was explicitly `null`; drop the current value.
    Clear,
    /// Field carried a value; replace the current one.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Whether the field was absent from the patch.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// The replacement value, when one was supplied.
    #[must_use]
    pub const fn set_value(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep | Self::Clear => None,
        }
    }
}

// `Keep` is only representable as an absent key, so struct fields carry
// `skip_serializing_if = "FieldUpdate::is_keep"`. If serialized anyway it
// degrades to `null`.
impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Keep | Self::Clear => serializer.serialize_none(),
            Self::Set(value) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Self::Clear,
            Some(value) => Self::Set(value),
        })
    }
}

/// Field-level update request for a task.
///
/// Status is deliberately absent; status moves travel through the status
/// update operation so that board transitions always record a from/to
/// pair in the commit log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// Title replacement. Clearing is rejected downstream.
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub title: FieldUpdate<String>,
    /// Description replacement or removal.
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub description: FieldUpdate<String>,
    /// Priority replacement; clearing resets to the default priority.
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub priority: FieldUpdate<TaskPriority>,
    /// Visibility replacement. Clearing is rejected downstream.
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub visibility_scope: FieldUpdate<VisibilityScope>,
    /// Deadline replacement or removal.
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub deadline: FieldUpdate<DateTime<Utc>>,
}

impl TaskPatch {
    /// Creates a patch that touches nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: FieldUpdate::Keep,
            description: FieldUpdate::Keep,
            priority: FieldUpdate::Keep,
            visibility_scope: FieldUpdate::Keep,
            deadline: FieldUpdate::Keep,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = FieldUpdate::Set(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = FieldUpdate::Set(description.into());
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = FieldUpdate::Clear;
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = FieldUpdate::Set(priority);
        self
    }

    /// Replaces the visibility scope.
    #[must_use]
    pub const fn with_visibility(mut self, scope: VisibilityScope) -> Self {
        self.visibility_scope = FieldUpdate::Set(scope);
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = FieldUpdate::Set(deadline);
        self
    }

    /// Removes the deadline.
    #[must_use]
    pub const fn clear_deadline(mut self) -> Self {
        self.deadline = FieldUpdate::Clear;
        self
    }

    /// Whether the patch touches no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_keep()
            && self.description.is_keep()
            && self.priority.is_keep()
            && self.visibility_scope.is_keep()
            && self.deadline.is_keep()
    }
}
