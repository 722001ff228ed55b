//! Best-effort audit trail port.
//!
//! Audit records describe who did what to which task. Recording is
//! advisory: services log and carry on when the sink fails, so a broken
//! audit backend can never block task work.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::org::domain::{CompanyId, UserId};
use crate::task::domain::TaskId;

/// Result alias for [`AuditSink`] operations.
pub type AuditResult<T> = Result<T, AuditSinkError>;

/// Errors surfaced by the audit sink.
#[derive(Debug, Clone, Error)]
pub enum AuditSinkError {
    /// The underlying sink failed.
    #[error("audit sink failure: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuditSinkError {
    /// Wraps an adapter-specific failure in [`AuditSinkError::Persistence`].
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// What kind of task mutation an audit record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A personal task was created.
    PersonalCreated,
    /// A directed task was created and assigned.
    DirectedCreated,
    /// Task fields were patched.
    TaskUpdated,
    /// The task moved to another status.
    StatusChanged,
    /// The task was restored to an earlier commit.
    TaskReverted,
}

impl AuditAction {
    /// Canonical label used in audit records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PersonalCreated => "personal_created",
            Self::DirectedCreated => "directed_created",
            Self::TaskUpdated => "task_updated",
            Self::StatusChanged => "status_changed",
            Self::TaskReverted => "task_reverted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// User who performed the action.
    pub actor_id: UserId,
    /// Company the touched task belongs to.
    pub company_id: CompanyId,
    /// Kind of mutation performed.
    pub action: AuditAction,
    /// Task that was touched.
    pub task_id: TaskId,
    /// Optional free-form detail, such as the commit message.
    pub detail: Option<String>,
    /// Instant the action was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Creates a record without detail text.
    #[must_use]
    pub const fn new(
        actor_id: UserId,
        company_id: CompanyId,
        action: AuditAction,
        task_id: TaskId,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            actor_id,
            company_id,
            action,
            task_id,
            detail: None,
            recorded_at,
        }
    }

    /// Attaches free-form detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Receives audit records about task mutations.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Records one audit event.
    ///
    /// # Errors
    ///
    /// Returns [`AuditSinkError::Persistence`] when the sink fails;
    /// callers are expected to log and continue.
    async fn record(&self, event: AuditEvent) -> AuditResult<()>;
}
