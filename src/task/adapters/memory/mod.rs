//! In-memory adapters backing the task ports.
//!
//! Used by tests and by embedders that do not need durable storage. All
//! adapters are cheap to clone and safe to share across tasks.

mod audit;
mod projects;
mod store;

pub use audit::InMemoryAuditSink;
pub use projects::InMemoryProjectCatalog;
pub use store::InMemoryTaskStore;
