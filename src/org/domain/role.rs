//! Role hierarchy for the org domain.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a user in the authority hierarchy.
///
/// The hierarchy runs `root > admin > supervisor > user`. Roles are stored
/// and exchanged as their string codes; any numeric role identifiers are a
/// legacy storage concern that stays outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator with unrestricted reach across companies.
    Root,
    /// Company-wide authority over a two-hop reporting chain.
    Admin,
    /// Area-bound authority over direct reports.
    Supervisor,
    /// Regular member with authority over their own work only.
    User,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Admin => "admin",
            Self::Supervisor => "supervisor",
            Self::User => "user",
        }
    }

    /// Returns `true` for roles that override per-creator guards on
    /// personal tasks (`root` and `admin`).
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Root | Self::Admin)
    }

    /// Returns `true` for roles permitted to create tasks for other users.
    #[must_use]
    pub const fn may_direct_tasks(self) -> bool {
        !matches!(self, Self::User)
    }

    /// Returns `true` for roles whose scope is bound to an area and which
    /// therefore require a configured `area_id`.
    #[must_use]
    pub const fn requires_area(self) -> bool {
        matches!(self, Self::Supervisor | Self::User)
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "root" => Ok(Self::Root),
            "admin" => Ok(Self::Admin),
            "supervisor" => Ok(Self::Supervisor),
            "user" => Ok(Self::User),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
