//! In-memory task store with per-task commit chains.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::org::domain::CompanyId;
use crate::task::domain::{CommitHash, Task, TaskCommit, TaskId};
use crate::task::ports::{TaskStore, TaskStoreError, TaskStoreResult};

/// Thread-safe in-memory implementation of [`TaskStore`].
///
/// Both write operations take the single write lock, so the head check
/// and the append happen atomically with respect to other writers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    tasks: HashMap<TaskId, Task>,
    /// Commit chains keyed by task, oldest commit first.
    chains: HashMap<TaskId, Vec<TaskCommit>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: &Task, genesis: &TaskCommit) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        if genesis.parent_hash().is_some() {
            return Err(TaskStoreError::ChainConflict { task_id: task.id() });
        }
        state.tasks.insert(task.id(), task.clone());
        state.chains.insert(task.id(), vec![genesis.clone()]);
        Ok(())
    }

    async fn append(&self, task: &Task, commit: &TaskCommit) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::NotFound(task.id()));
        }
        let chain = state.chains.entry(task.id()).or_default();
        let head = chain.last().map(TaskCommit::hash);
        if commit.parent_hash() != head {
            return Err(TaskStoreError::ChainConflict { task_id: task.id() });
        }
        chain.push(commit.clone());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, task_id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.tasks.get(&task_id).cloned())
    }

    async fn list_by_company(&self, company_id: CompanyId) -> TaskStoreResult<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.company_id() == company_id)
            .cloned()
            .collect();
        tasks.sort_by_key(Task::id);
        Ok(tasks)
    }

    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by_key(Task::id);
        Ok(tasks)
    }

    async fn history(&self, task_id: TaskId) -> TaskStoreResult<Vec<TaskCommit>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let mut commits = state.chains.get(&task_id).cloned().unwrap_or_default();
        commits.reverse();
        Ok(commits)
    }

    async fn head(&self, task_id: TaskId) -> TaskStoreResult<Option<CommitHash>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state
            .chains
            .get(&task_id)
            .and_then(|chain| chain.last())
            .map(|commit| commit.hash().clone()))
    }
}
