//! Directory adapters for the org module.
//!
//! Concrete implementations of the [`UserDirectory`] port. The in-memory
//! adapter backs unit tests and lightweight embeddings; production
//! deployments supply their own directory-backed implementation.
//!
//! [`UserDirectory`]: crate::org::ports::UserDirectory

pub mod memory;

pub use memory::InMemoryUserDirectory;
