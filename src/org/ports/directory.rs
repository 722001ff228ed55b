//! Directory port for user and reporting-line lookups.

use crate::org::domain::{AreaId, OrgUser, TeamId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Read-only contract over the platform's user directory.
///
/// Lookups return full records; scope resolution applies status, company,
/// and area policy on top.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_user(&self, id: UserId) -> DirectoryResult<Option<OrgUser>>;

    /// Returns the users whose reporting line points at `manager_id`.
    ///
    /// Returns an empty list for unknown managers.
    async fn direct_reports(&self, manager_id: UserId) -> DirectoryResult<Vec<OrgUser>>;

    /// Returns the users belonging to the given area.
    async fn users_in_area(&self, area_id: AreaId) -> DirectoryResult<Vec<OrgUser>>;

    /// Returns the users belonging to the given team.
    async fn team_members(&self, team_id: TeamId) -> DirectoryResult<Vec<OrgUser>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Directory storage failure.
    #[error("directory error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
