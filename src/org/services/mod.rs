//! Application services for scope resolution.

mod resolver;

pub use resolver::{
    ScopeResolutionError, ScopeResolutionResult, ScopeResolver, TargetSelection,
};
