//! Acting-user descriptor supplied by the outer layer.

use super::{AreaId, CompanyId, Role, UserId};
use serde::{Deserialize, Serialize};

/// Identity, role, and tenancy of the user performing an operation.
///
/// The outer transport layer authenticates the request and hands the core
/// a fully resolved descriptor; the core never re-derives role or company
/// membership from storage on the hot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: UserId,
    role: Role,
    company_id: CompanyId,
    area_id: Option<AreaId>,
}

impl Actor {
    /// Creates an actor descriptor without an area membership.
    #[must_use]
    pub const fn new(id: UserId, role: Role, company_id: CompanyId) -> Self {
        Self {
            id,
            role,
            company_id,
            area_id: None,
        }
    }

    /// Sets the actor's area membership.
    #[must_use]
    pub const fn with_area(mut self, area_id: AreaId) -> Self {
        self.area_id = Some(area_id);
        self
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the acting user's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the acting user's company.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the acting user's area membership, if any.
    #[must_use]
    pub const fn area_id(&self) -> Option<AreaId> {
        self.area_id
    }
}
