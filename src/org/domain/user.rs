//! User directory records for the org domain.

use super::{AreaId, CompanyId, Role, TeamId, UserId};
use serde::{Deserialize, Serialize};

/// Account standing of a directory user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Account is in good standing.
    Active,
    /// Account is temporarily blocked.
    Suspended,
    /// Account has been retired.
    Inactive,
}

impl UserStatus {
    /// Returns `true` when the user may receive new work.
    #[must_use]
    pub const fn is_assignable(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Directory record for a user account.
///
/// The org core treats user records as reference data owned by the outer
/// platform; it reads them through the directory port and never mutates
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgUser {
    id: UserId,
    display_name: String,
    role: Role,
    status: UserStatus,
    company_id: CompanyId,
    area_id: Option<AreaId>,
    team_id: Option<TeamId>,
    manager_id: Option<UserId>,
}

/// Parameter object for reconstructing a persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted display name.
    pub display_name: String,
    /// Persisted role.
    pub role: Role,
    /// Persisted account standing.
    pub status: UserStatus,
    /// Persisted company membership.
    pub company_id: CompanyId,
    /// Persisted area membership, if any.
    pub area_id: Option<AreaId>,
    /// Persisted team membership, if any.
    pub team_id: Option<TeamId>,
    /// Persisted reporting line, if any.
    pub manager_id: Option<UserId>,
}

impl OrgUser {
    /// Reconstructs a user record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            display_name: data.display_name,
            role: data.role,
            status: data.status,
            company_id: data.company_id,
            area_id: data.area_id,
            team_id: data.team_id,
            manager_id: data.manager_id,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the user role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the account standing.
    #[must_use]
    pub const fn status(&self) -> UserStatus {
        self.status
    }

    /// Returns the company membership.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the area membership, if any.
    #[must_use]
    pub const fn area_id(&self) -> Option<AreaId> {
        self.area_id
    }

    /// Returns the team membership, if any.
    #[must_use]
    pub const fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    /// Returns the reporting line, if any.
    #[must_use]
    pub const fn manager_id(&self) -> Option<UserId> {
        self.manager_id
    }
}
