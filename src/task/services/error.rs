//! Error surface of the task services.
//!
//! Lower-layer errors are folded into one enum so embedders can match on
//! outcome classes: bad input, missing rights, broken org configuration,
//! empty assignments, unknown records, write races, tampered history, or
//! infrastructure failure.

use std::sync::Arc;

use thiserror::Error;

use crate::org::domain::ScopeError;
use crate::org::ports::DirectoryError;
use crate::org::services::ScopeResolutionError;
use crate::task::domain::{ChainError, CommitError, CommitHash, TaskDomainError, TaskId};
use crate::task::ports::{ProjectCatalogError, TaskStoreError};

/// Result alias for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Errors returned by the task services.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Caller-supplied input was rejected.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The actor is not allowed to perform the operation.
    #[error("not allowed: {0}")]
    Authorization(String),

    /// The actor's org configuration cannot produce a scope.
    #[error(transparent)]
    ScopeConfiguration(#[from] ScopeError),

    /// Target resolution left no user to assign the task to.
    #[error("no valid assignment targets remain")]
    NoValidTargets,

    /// No readable task with this identifier exists.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    /// The task's history holds no commit with this hash.
    #[error("commit {0} not found in this task's history")]
    CommitNotFound(CommitHash),

    /// Another writer appended to the task first; the caller may retry.
    #[error("task {0} was modified concurrently")]
    Conflict(TaskId),

    /// Stored history failed an integrity check.
    #[error(transparent)]
    Integrity(#[from] ChainError),

    /// The underlying infrastructure failed.
    #[error("persistence failure: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskServiceError {
    /// Wraps an infrastructure failure in [`TaskServiceError::Persistence`].
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<TaskDomainError> for TaskServiceError {
    fn from(err: TaskDomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<CommitError> for TaskServiceError {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::EmptyMessage => Self::Validation(err.to_string()),
            CommitError::Canonicalize(source) => Self::persistence(source),
        }
    }
}

impl From<TaskStoreError> for TaskServiceError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::DuplicateTask(task_id) => Self::Conflict(task_id),
            TaskStoreError::NotFound(task_id) => Self::TaskNotFound(task_id),
            TaskStoreError::ChainConflict { task_id } => Self::Conflict(task_id),
            TaskStoreError::Persistence(source) => Self::Persistence(source),
        }
    }
}

impl From<DirectoryError> for TaskServiceError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Persistence(source) => Self::Persistence(source),
        }
    }
}

impl From<ScopeResolutionError> for TaskServiceError {
    fn from(err: ScopeResolutionError) -> Self {
        match err {
            ScopeResolutionError::Scope(source) => Self::ScopeConfiguration(source),
            ScopeResolutionError::Directory(source) => source.into(),
        }
    }
}

impl From<ProjectCatalogError> for TaskServiceError {
    fn from(err: ProjectCatalogError) -> Self {
        match err {
            ProjectCatalogError::Persistence(source) => Self::Persistence(source),
        }
    }
}
