//! Domain model for organisational structure and scope resolution.
//!
//! The org domain models roles, actors, users, and the membership sets a
//! scope resolution produces, while keeping directory lookups behind the
//! port boundary.

mod actor;
mod error;
mod ids;
mod role;
mod scope;
mod scope_set;
mod user;

pub use actor::Actor;
pub use error::{ParseRoleError, ScopeError};
pub(crate) use ids::uuid_id;
pub use ids::{AreaId, CompanyId, TeamId, UserId};
pub use role::Role;
pub use scope::{AssignmentScope, ViewerScope};
pub use scope_set::ScopeSet;
pub use user::{OrgUser, PersistedUserData, UserStatus};
