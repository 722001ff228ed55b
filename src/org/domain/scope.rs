//! Resolved scope values produced by scope resolution.

use super::{ScopeSet, UserId};
use serde::{Deserialize, Serialize};

/// The set of users an actor may assign work to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssignmentScope {
    /// No restriction; any user is a permissible assignee.
    Unrestricted,
    /// Assignment restricted to the listed members.
    Members(ScopeSet),
}

impl AssignmentScope {
    /// Returns `true` when the scope permits assigning to `user_id`.
    #[must_use]
    pub fn permits(&self, user_id: UserId) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Members(members) => members.contains(user_id),
        }
    }

    /// Restricts a candidate target set to this scope.
    #[must_use]
    pub fn restrict(&self, candidates: &ScopeSet) -> ScopeSet {
        match self {
            Self::Unrestricted => candidates.clone(),
            Self::Members(members) => members.intersection(candidates),
        }
    }

    /// Returns the member set for restricted scopes.
    #[must_use]
    pub const fn members(&self) -> Option<&ScopeSet> {
        match self {
            Self::Unrestricted => None,
            Self::Members(members) => Some(members),
        }
    }
}

/// The visibility context applied when an actor lists tasks.
///
/// Each variant carries exactly the directory data its role's visibility
/// rule consults, so the predicate over a task is a pure function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewerScope {
    /// Root operators observe every task on the platform.
    Unrestricted,
    /// Admins observe tasks they created, directed tasks assigned inside
    /// their two-hop reporting chain, and personal tasks of chain members
    /// that are shared beyond private.
    AdminChain {
        /// The viewing admin.
        viewer: UserId,
        /// Self plus direct reports plus those reports' direct reports.
        chain: ScopeSet,
    },
    /// Supervisors observe tasks they created, tasks assigned to them,
    /// and personal tasks of area members shared at supervisor
    /// visibility.
    AreaSupervisor {
        /// The viewing supervisor.
        viewer: UserId,
        /// Every user recorded in the supervisor's area.
        area_members: ScopeSet,
    },
    /// Regular users observe tasks they created or are assigned to.
    SelfOnly {
        /// The viewing user.
        viewer: UserId,
    },
}

impl ViewerScope {
    /// Returns the viewing user for scoped variants.
    #[must_use]
    pub const fn viewer(&self) -> Option<UserId> {
        match self {
            Self::Unrestricted => None,
            Self::AdminChain { viewer, .. }
            | Self::AreaSupervisor { viewer, .. }
            | Self::SelfOnly { viewer } => Some(*viewer),
        }
    }
}
