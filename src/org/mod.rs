//! Organisational structure and scope resolution for Gantt.
//!
//! Companies contain areas and teams; users carry a role in the hierarchy
//! `root > admin > supervisor > user`. This module resolves, for any acting
//! user, the set of user identifiers the actor may assign work to and the
//! visibility context applied when listing tasks. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
