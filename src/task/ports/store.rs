//! Persistence port for tasks and their commit chains.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::org::domain::CompanyId;
use crate::task::domain::{CommitHash, Task, TaskCommit, TaskId};

/// Result alias for [`TaskStore`] operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Errors surfaced by task storage.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("task {0} already exists")]
    DuplicateTask(TaskId),

    /// No task with the given identifier exists.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// The appended commit does not extend the task's current head, so
    /// another writer got there first.
    #[error("commit for task {task_id} does not extend the current chain head")]
    ChainConflict {
        /// Task whose chain rejected the append.
        task_id: TaskId,
    },

    /// The underlying storage failed.
    #[error("task storage failure: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps an adapter-specific failure in [`TaskStoreError::Persistence`].
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Stores tasks together with their append-only commit chains.
///
/// The write operations are transactional: the task state and the commit
/// land together or not at all. Appends are conditional on the chain
/// head, which serializes writers per task without any locking on the
/// caller's side.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task together with its genesis commit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the identifier is
    /// already taken and [`TaskStoreError::Persistence`] when storage
    /// fails.
    async fn insert(&self, task: &Task, genesis: &TaskCommit) -> TaskStoreResult<()>;

    /// Stores the mutated task state and appends `commit` to its chain.
    ///
    /// The append only succeeds when `commit`'s parent hash equals the
    /// task's current chain head; otherwise nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist,
    /// [`TaskStoreError::ChainConflict`] when the parent hash does not
    /// match the chain head, and [`TaskStoreError::Persistence`] when
    /// storage fails.
    async fn append(&self, task: &Task, commit: &TaskCommit) -> TaskStoreResult<()>;

    /// Looks up a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when storage fails.
    async fn find_by_id(&self, task_id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Lists every task owned by `company_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when storage fails.
    async fn list_by_company(&self, company_id: CompanyId) -> TaskStoreResult<Vec<Task>>;

    /// Lists every task across all companies.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when storage fails.
    async fn list_all(&self) -> TaskStoreResult<Vec<Task>>;

    /// Returns a task's commit history, newest first. Unknown tasks
    /// yield an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when storage fails.
    async fn history(&self, task_id: TaskId) -> TaskStoreResult<Vec<TaskCommit>>;

    /// Returns the hash of the newest commit on a task's chain, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when storage fails.
    async fn head(&self, task_id: TaskId) -> TaskStoreResult<Option<CommitHash>>;
}
