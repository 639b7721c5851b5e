//! In-memory sweep store for tests and single-process hosts.

use crate::escalation::ports::{SweepStore, SweepStoreError, SweepStoreResult};
use crate::escalation::sweep::SweepSnapshot;
use crate::workflow::domain::{Project, Ticket};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory sweep store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySweepStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    tickets: Vec<Ticket>,
    projects: Vec<Project>,
}

impl InMemorySweepStore {
    /// Creates a store seeded with the given collections.
    #[must_use]
    pub fn new(tickets: Vec<Ticket>, projects: Vec<Project>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState { tickets, projects })),
        }
    }

    /// Returns a copy of the current ticket collection.
    ///
    /// # Errors
    ///
    /// Returns [`SweepStoreError::Unavailable`] when the state lock is
    /// poisoned.
    pub fn tickets(&self) -> SweepStoreResult<Vec<Ticket>> {
        let state = self
            .state
            .read()
            .map_err(|_| SweepStoreError::Unavailable("state lock poisoned".to_owned()))?;
        Ok(state.tickets.clone())
    }

    /// Replaces the ticket collection, as an interactive mutation would.
    ///
    /// # Errors
    ///
    /// Returns [`SweepStoreError::Unavailable`] when the state lock is
    /// poisoned.
    pub fn replace_tickets(&self, tickets: Vec<Ticket>) -> SweepStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| SweepStoreError::Unavailable("state lock poisoned".to_owned()))?;
        state.tickets = tickets;
        Ok(())
    }
}

#[async_trait]
impl SweepStore for InMemorySweepStore {
    async fn load_snapshot(&self) -> SweepStoreResult<SweepSnapshot> {
        let state = self
            .state
            .read()
            .map_err(|_| SweepStoreError::Unavailable("state lock poisoned".to_owned()))?;
        Ok(SweepSnapshot::new(
            state.tickets.clone(),
            state.projects.clone(),
        ))
    }

    async fn persist(&self, tickets: Vec<Ticket>) -> SweepStoreResult<()> {
        self.replace_tickets(tickets)
    }
}
