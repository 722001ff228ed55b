//! In-memory directory for scope resolution tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::org::{
    domain::{AreaId, OrgUser, TeamId, UserId},
    ports::{DirectoryError, DirectoryResult, UserDirectory},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    users: HashMap<UserId, OrgUser>,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user record.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the directory lock is
    /// poisoned.
    pub fn insert(&self, user: OrgUser) -> DirectoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        state.users.insert(user.id(), user);
        Ok(())
    }
}

fn collect_matching(
    state: &InMemoryDirectoryState,
    predicate: impl Fn(&OrgUser) -> bool,
) -> Vec<OrgUser> {
    let mut users: Vec<OrgUser> = state.users.values().filter(|u| predicate(u)).cloned().collect();
    users.sort_by_key(OrgUser::id);
    users
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, id: UserId) -> DirectoryResult<Option<OrgUser>> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.users.get(&id).cloned())
    }

    async fn direct_reports(&self, manager_id: UserId) -> DirectoryResult<Vec<OrgUser>> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(collect_matching(&state, |u| {
            u.manager_id() == Some(manager_id)
        }))
    }

    async fn users_in_area(&self, area_id: AreaId) -> DirectoryResult<Vec<OrgUser>> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(collect_matching(&state, |u| u.area_id() == Some(area_id)))
    }

    async fn team_members(&self, team_id: TeamId) -> DirectoryResult<Vec<OrgUser>> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(collect_matching(&state, |u| u.team_id() == Some(team_id)))
    }
}
