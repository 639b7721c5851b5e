//! Snapshot store port consumed by the sweep scheduler.

use crate::escalation::sweep::SweepSnapshot;
use crate::workflow::domain::Ticket;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sweep store operations.
pub type SweepStoreResult<T> = Result<T, SweepStoreError>;

/// Source of the current ticket/project view and sink for sweep results.
///
/// `load_snapshot` is called on every tick so the sweep always sees the
/// current state, never a copy captured when the scheduler was created.
#[async_trait]
pub trait SweepStore: Send + Sync {
    /// Resolves the current snapshot of tickets and projects.
    ///
    /// # Errors
    ///
    /// Returns [`SweepStoreError`] when the backing state cannot be read.
    async fn load_snapshot(&self) -> SweepStoreResult<SweepSnapshot>;

    /// Persists the ticket collection produced by a sweep pass.
    ///
    /// # Errors
    ///
    /// Returns [`SweepStoreError`] when the backing state cannot be
    /// written.
    async fn persist(&self, tickets: Vec<Ticket>) -> SweepStoreResult<()>;
}

/// Errors returned by sweep store implementations.
#[derive(Debug, Clone, Error)]
pub enum SweepStoreError {
    /// The backing state is unreachable.
    #[error("sweep store unavailable: {0}")]
    Unavailable(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SweepStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
