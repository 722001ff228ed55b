//! Port contracts for org directory access.
//!
//! Ports define infrastructure-agnostic interfaces used by scope
//! resolution.

pub mod directory;

pub use directory::{DirectoryError, DirectoryResult, UserDirectory};
