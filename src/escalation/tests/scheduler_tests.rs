//! Scheduler tests on a paused tokio clock.

use super::fixtures::{FixedClock, moment, project, ticket};
use crate::escalation::adapters::InMemorySweepStore;
use crate::escalation::ports::{SweepStore, SweepStoreError, SweepStoreResult};
use crate::escalation::services::EscalationScheduler;
use crate::escalation::sweep::SweepSnapshot;
use crate::workflow::domain::{EscalationLevel, Ticket};
use async_trait::async_trait;
use eyre::{bail, ensure};
use std::sync::Arc;
use std::time::Duration;

const PERIOD: Duration = Duration::from_secs(60);

/// Store whose backing state is always unreachable.
struct UnreachableStore;

#[async_trait]
impl SweepStore for UnreachableStore {
    async fn load_snapshot(&self) -> SweepStoreResult<SweepSnapshot> {
        Err(SweepStoreError::Unavailable("backend offline".to_owned()))
    }

    async fn persist(&self, _tickets: Vec<Ticket>) -> SweepStoreResult<()> {
        Err(SweepStoreError::Unavailable("backend offline".to_owned()))
    }
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn scheduler_escalates_overdue_tickets_and_persists() -> eyre::Result<()> {
    let store = Arc::new(InMemorySweepStore::new(
        vec![ticket("PRJ-A", 0, None)?],
        vec![project("PRJ-A", 2)?],
    ));
    let clock = Arc::new(FixedClock::new(moment(10)));
    let handle =
        EscalationScheduler::new(Arc::clone(&store), clock, PERIOD).spawn();

    // The first tick fires immediately; let it run.
    tokio::time::sleep(Duration::from_millis(1)).await;

    let stats = handle.stats();
    ensure!(stats.ticks >= 1);
    ensure!(stats.escalations == 1);
    ensure!(stats.failures == 0);

    let tickets = store.tickets()?;
    let Some(swept) = tickets.first() else {
        bail!("expected the persisted ticket");
    };
    ensure!(swept.escalation_level() == EscalationLevel::new(1)?);

    handle.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn scheduler_leaves_quiet_tickets_alone_on_later_ticks() -> eyre::Result<()> {
    let store = Arc::new(InMemorySweepStore::new(
        vec![ticket("PRJ-A", 0, None)?],
        vec![project("PRJ-A", 2)?],
    ));
    // The domain clock is frozen, so once the first reminder restarts the
    // anchor every later pass sees zero elapsed time.
    let clock = Arc::new(FixedClock::new(moment(10)));
    let handle = EscalationScheduler::new(Arc::clone(&store), clock, PERIOD).spawn();

    tokio::time::sleep(PERIOD * 3 + Duration::from_millis(1)).await;

    let stats = handle.stats();
    ensure!(stats.ticks >= 3);
    ensure!(stats.escalations == 1, "the sweep must be idempotent once quiet");

    handle.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn scheduler_counts_store_failures_and_keeps_running() -> eyre::Result<()> {
    let clock = Arc::new(FixedClock::new(moment(10)));
    let handle = EscalationScheduler::new(Arc::new(UnreachableStore), clock, PERIOD).spawn();

    tokio::time::sleep(PERIOD * 2 + Duration::from_millis(1)).await;

    let stats = handle.stats();
    ensure!(stats.ticks >= 2, "failures must not stop the timer");
    ensure!(stats.failures >= 2);
    ensure!(stats.escalations == 0);

    handle.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn shutdown_stops_the_sweep_task() -> eyre::Result<()> {
    let store = Arc::new(InMemorySweepStore::new(Vec::new(), Vec::new()));
    let clock = Arc::new(FixedClock::new(moment(0)));
    let handle = EscalationScheduler::new(store, clock, PERIOD).spawn();

    tokio::time::sleep(Duration::from_millis(1)).await;

    // Completing proves the task observed the signal and exited.
    handle.shutdown().await;
    Ok(())
}
