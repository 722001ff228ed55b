//! Identifier types for the task domain.

use crate::org::domain::uuid_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

uuid_id! {
    /// Unique identifier for a task record.
    TaskId
}

uuid_id! {
    /// Unique identifier for a project.
    ProjectId
}

uuid_id! {
    /// Unique identifier for a commit record.
    CommitId
}
