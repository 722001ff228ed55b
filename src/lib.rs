//! Gantt: multi-tenant task-management core.
//!
//! This crate provides the domain core for a multi-tenant task platform:
//! role-based scope resolution, a task aggregate with assignment and
//! visibility rules, an append-only hash-chained commit history per task,
//! and pure board/insight projections. An outer transport layer resolves
//! the acting user and renders whatever structured results the core
//! returns; the core never touches HTTP or SQL.
//!
//! # Architecture
//!
//! Gantt follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory reference
//!   adapters ship with the crate)
//!
//! # Modules
//!
//! - [`org`]: Role hierarchy, actor descriptors, and scope resolution
//! - [`task`]: Task aggregate, commit chain, mutation service, and
//!   projections

pub mod org;
pub mod task;
