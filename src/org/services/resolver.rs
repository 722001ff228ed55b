//! Scope resolution over the user directory.
//!
//! Resolution answers two questions for an acting user: *who may this
//! actor assign work to* ([`AssignmentScope`]) and *which tasks may this
//! actor observe* ([`ViewerScope`]). Both are computed from reporting
//! lines and area membership read through the [`UserDirectory`] port;
//! nothing here touches task storage.

use crate::org::{
    domain::{
        Actor, AreaId, AssignmentScope, OrgUser, Role, ScopeError, ScopeSet, TeamId, UserId,
        ViewerScope,
    },
    ports::{DirectoryError, UserDirectory},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

/// Requested recipients for a directed task.
///
/// Explicit user identifiers, a whole area, and a whole team may be
/// combined; the resolved target set is their union restricted to the
/// actor's assignment scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSelection {
    user_ids: Vec<UserId>,
    area_id: Option<AreaId>,
    team_id: Option<TeamId>,
}

impl TargetSelection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            user_ids: Vec::new(),
            area_id: None,
            team_id: None,
        }
    }

    /// Adds explicit target users.
    #[must_use]
    pub fn with_users(mut self, user_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.user_ids.extend(user_ids);
        self
    }

    /// Targets every member of an area.
    #[must_use]
    pub const fn with_area(mut self, area_id: AreaId) -> Self {
        self.area_id = Some(area_id);
        self
    }

    /// Targets every member of a team.
    #[must_use]
    pub const fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Returns `true` when the selection names no users, area, or team.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty() && self.area_id.is_none() && self.team_id.is_none()
    }
}

/// Service-level errors for scope resolution.
#[derive(Debug, Clone, Error)]
pub enum ScopeResolutionError {
    /// Directory data violates a structural requirement.
    #[error(transparent)]
    Scope(#[from] ScopeError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type for scope resolution operations.
pub type ScopeResolutionResult<T> = Result<T, ScopeResolutionError>;

/// Scope resolution service.
#[derive(Clone)]
pub struct ScopeResolver<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
}

impl<D> ScopeResolver<D>
where
    D: UserDirectory,
{
    /// Creates a new scope resolver.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Resolves the set of users the actor may assign work to.
    ///
    /// Root actors are unrestricted. Admins reach their two-hop reporting
    /// chain (self, direct reports, and those reports' direct reports).
    /// Supervisors reach themselves and direct reports within their own
    /// area. Regular users reach only themselves.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::MissingArea`] when an area-bound role has no
    /// configured area, or [`ScopeResolutionError::Directory`] when a
    /// lookup fails.
    pub async fn assignment_scope(&self, actor: &Actor) -> ScopeResolutionResult<AssignmentScope> {
        let scope = match actor.role() {
            Role::Root => AssignmentScope::Unrestricted,
            Role::Admin => AssignmentScope::Members(self.admin_chain(actor).await?),
            Role::Supervisor => AssignmentScope::Members(self.supervised_members(actor).await?),
            Role::User => {
                require_area(actor)?;
                AssignmentScope::Members(ScopeSet::single(actor.id()))
            }
        };
        Ok(scope)
    }

    /// Resolves the visibility context for task listing.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::MissingArea`] for supervisors without a
    /// configured area, or [`ScopeResolutionError::Directory`] when a
    /// lookup fails. Regular users need no area to list their own tasks.
    pub async fn viewer_scope(&self, actor: &Actor) -> ScopeResolutionResult<ViewerScope> {
        let scope = match actor.role() {
            Role::Root => ViewerScope::Unrestricted,
            Role::Admin => ViewerScope::AdminChain {
                viewer: actor.id(),
                chain: self.admin_chain(actor).await?,
            },
            Role::Supervisor => {
                let area_id = require_area(actor)?;
                ViewerScope::AreaSupervisor {
                    viewer: actor.id(),
                    area_members: self.area_members(actor, area_id).await?,
                }
            }
            Role::User => ViewerScope::SelfOnly { viewer: actor.id() },
        };
        Ok(scope)
    }

    /// Resolves a target selection into the concrete set of assignable
    /// users.
    ///
    /// Candidates are the union of the explicit users, the area members,
    /// and the team members named by the selection, kept only when active
    /// and in the actor's company, then restricted to the actor's
    /// assignment scope. The result may be empty; callers decide what an
    /// empty target set means.
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`Self::assignment_scope`]. Scope is
    /// resolved before any candidate lookup so configuration faults are
    /// reported ahead of target problems.
    pub async fn resolve_targets(
        &self,
        actor: &Actor,
        selection: &TargetSelection,
    ) -> ScopeResolutionResult<ScopeSet> {
        let scope = self.assignment_scope(actor).await?;

        let mut candidates = ScopeSet::new();
        for user_id in &selection.user_ids {
            if let Some(user) = self.directory.find_user(*user_id).await? {
                insert_if_assignable(&mut candidates, actor, &user);
            }
        }
        if let Some(area_id) = selection.area_id {
            for user in self.directory.users_in_area(area_id).await? {
                insert_if_assignable(&mut candidates, actor, &user);
            }
        }
        if let Some(team_id) = selection.team_id {
            for user in self.directory.team_members(team_id).await? {
                insert_if_assignable(&mut candidates, actor, &user);
            }
        }

        Ok(scope.restrict(&candidates))
    }

    /// Collects the admin's two-hop reporting chain: self, direct
    /// reports, and each report's direct reports. The walk stops at two
    /// hops; deeper reporting lines stay out of scope.
    async fn admin_chain(&self, actor: &Actor) -> ScopeResolutionResult<ScopeSet> {
        let mut chain = ScopeSet::single(actor.id());
        let first_hop = self.directory.direct_reports(actor.id()).await?;
        for report in &first_hop {
            if report.company_id() != actor.company_id() {
                continue;
            }
            chain.insert(report.id());
            for second in self.directory.direct_reports(report.id()).await? {
                if second.company_id() == actor.company_id() {
                    chain.insert(second.id());
                }
            }
        }
        Ok(chain)
    }

    /// Collects the supervisor's assignable members: self plus direct
    /// reports recorded in the supervisor's own area.
    async fn supervised_members(&self, actor: &Actor) -> ScopeResolutionResult<ScopeSet> {
        let area_id = require_area(actor)?;
        let mut members = ScopeSet::single(actor.id());
        for report in self.directory.direct_reports(actor.id()).await? {
            if report.company_id() == actor.company_id() && report.area_id() == Some(area_id) {
                members.insert(report.id());
            }
        }
        Ok(members)
    }

    /// Collects every same-company user recorded in the given area.
    async fn area_members(
        &self,
        actor: &Actor,
        area_id: AreaId,
    ) -> ScopeResolutionResult<ScopeSet> {
        let users = self.directory.users_in_area(area_id).await?;
        Ok(users
            .iter()
            .filter(|user| user.company_id() == actor.company_id())
            .map(OrgUser::id)
            .collect())
    }
}

/// Adds a candidate when it is an active, same-company account.
fn insert_if_assignable(candidates: &mut ScopeSet, actor: &Actor, user: &OrgUser) {
    if user.status().is_assignable() && user.company_id() == actor.company_id() {
        candidates.insert(user.id());
    }
}

/// Returns the actor's area or reports the configuration fault.
fn require_area(actor: &Actor) -> Result<AreaId, ScopeError> {
    actor.area_id().ok_or_else(|| {
        error!(
            user_id = %actor.id(),
            role = %actor.role(),
            "scope resolution blocked: area-bound role has no area configured",
        );
        ScopeError::MissingArea {
            user_id: actor.id(),
            role: actor.role(),
        }
    })
}
