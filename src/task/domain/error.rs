//! Error types for task domain validation and parsing.

use super::VisibilityScope;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A personal task was given a visibility scope wider than its creator
    /// can share. Personal tasks only permit `private` and `supervisor`.
    #[error("visibility scope '{0}' is not permitted for a personal task")]
    PersonalVisibilityTooWide(VisibilityScope),

    /// A patch attempted to clear the visibility scope. Visibility always
    /// carries a value; it can be narrowed or widened, never removed.
    #[error("visibility scope cannot be cleared")]
    VisibilityCleared,
}

/// Error returned while parsing status labels supplied by callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing priority labels supplied by callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing visibility scope labels supplied by
/// callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown visibility scope: {0}")]
pub struct ParseVisibilityScopeError(pub String);
