//! In-memory project catalog.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::task::domain::{ProjectId, ProjectRef};
use crate::task::ports::{ProjectCatalog, ProjectCatalogError, ProjectCatalogResult};

/// Thread-safe in-memory implementation of [`ProjectCatalog`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectCatalog {
    state: Arc<RwLock<HashMap<ProjectId, ProjectRef>>>,
}

impl InMemoryProjectCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Persistence`] when the backing lock
    /// is poisoned.
    pub fn insert(&self, project: ProjectRef) -> ProjectCatalogResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectCatalogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.insert(project.id(), project);
        Ok(())
    }
}

#[async_trait]
impl ProjectCatalog for InMemoryProjectCatalog {
    async fn find_project(&self, project_id: ProjectId) -> ProjectCatalogResult<Option<ProjectRef>> {
        let state = self.state.read().map_err(|err| {
            ProjectCatalogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&project_id).cloned())
    }
}
