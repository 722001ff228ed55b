//! Task management for Gantt.
//!
//! This module implements the task aggregate with assignment and
//! visibility rules, the append-only hash-chained commit history recorded
//! for every mutation, the mutation service orchestrating scope checks,
//! validation, writes, and commit appends, and the pure board and insight
//! projections. The module follows hexagonal architecture:
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
