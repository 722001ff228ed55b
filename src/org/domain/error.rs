//! Error types for org domain validation and parsing.

use super::{Role, UserId};
use thiserror::Error;

/// Errors raised while resolving scopes from directory data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScopeError {
    /// An area-bound role has no area configured. This is a data-integrity
    /// fault in the directory, not a user mistake, and blocks task
    /// creation until an operator repairs the record.
    #[error("user {user_id} holds area-bound role '{role}' but has no area configured")]
    MissingArea {
        /// The misconfigured user.
        user_id: UserId,
        /// The role requiring an area.
        role: Role,
    },
}

/// Error returned while parsing role codes from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
