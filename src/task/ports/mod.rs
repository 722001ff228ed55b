//! Ports describing the persistence and side-channel needs of the task
//! context. Adapters implement these traits; services depend on them.

mod audit;
mod projects;
mod store;

pub use audit::{AuditAction, AuditEvent, AuditResult, AuditSink, AuditSinkError};
pub use projects::{ProjectCatalog, ProjectCatalogError, ProjectCatalogResult};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
