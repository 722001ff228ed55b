//! In-memory audit sink that keeps records for inspection.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::task::ports::{AuditEvent, AuditResult, AuditSink, AuditSinkError};

/// Thread-safe in-memory implementation of [`AuditSink`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditSink {
    state: Arc<RwLock<Vec<AuditEvent>>>,
}

impl InMemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every recorded event, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AuditSinkError::Persistence`] when the backing lock is
    /// poisoned.
    pub fn events(&self) -> AuditResult<Vec<AuditEvent>> {
        let state = self
            .state
            .read()
            .map_err(|err| AuditSinkError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.clone())
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn record(&self, event: AuditEvent) -> AuditResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AuditSinkError::persistence(std::io::Error::other(err.to_string())))?;
        state.push(event);
        Ok(())
    }
}
