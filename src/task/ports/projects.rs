//! Lookup port for project reference data.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::task::domain::{ProjectId, ProjectRef};

/// Result alias for [`ProjectCatalog`] operations.
pub type ProjectCatalogResult<T> = Result<T, ProjectCatalogError>;

/// Errors surfaced by the project catalog.
#[derive(Debug, Clone, Error)]
pub enum ProjectCatalogError {
    /// The underlying storage failed.
    #[error("project catalog failure: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectCatalogError {
    /// Wraps an adapter-specific failure in
    /// [`ProjectCatalogError::Persistence`].
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Read-only access to the projects tasks may link to.
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    /// Looks up a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Persistence`] when storage fails.
    async fn find_project(&self, project_id: ProjectId) -> ProjectCatalogResult<Option<ProjectRef>>;
}
