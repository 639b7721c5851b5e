//! Recurring sweep task with an owned, cancellable timer.

use crate::escalation::ports::SweepStore;
use crate::escalation::sweep::sweep;
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Counters published by the running sweep task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Sweep passes executed.
    pub ticks: usize,
    /// Tickets that advanced an escalation level.
    pub escalations: usize,
    /// Passes that failed against the store and were skipped.
    pub failures: usize,
}

/// Owns the sweep timer and drives one pass per period.
///
/// Each tick re-resolves the snapshot through the store port so concurrent
/// interactive mutations are always visible, runs the pure sweep at the
/// clock's current time, and persists only when something changed. Store
/// failures skip the pass and are counted; the loop keeps running.
pub struct EscalationScheduler<S, C>
where
    S: SweepStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    period: Duration,
}

impl<S, C> EscalationScheduler<S, C>
where
    S: SweepStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a scheduler sweeping once per `period`.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>, period: Duration) -> Self {
        Self {
            store,
            clock,
            period,
        }
    }

    /// Spawns the recurring sweep task and returns its handle.
    ///
    /// The first pass runs immediately; missed ticks are skipped rather
    /// than bunched. The task runs until the handle shuts it down or is
    /// dropped.
    #[must_use]
    pub fn spawn(self) -> SweepHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (stats_tx, stats_rx) = watch::channel(SweepStats::default());

        let join = tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut stats = SweepStats::default();

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        stats.ticks += 1;
                        match self.run_pass().await {
                            Ok(escalated) => stats.escalations += escalated,
                            Err(()) => stats.failures += 1,
                        }
                        stats_tx.send_replace(stats);
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        SweepHandle {
            shutdown: shutdown_tx,
            stats: stats_rx,
            join: Some(join),
        }
    }

    async fn run_pass(&self) -> Result<usize, ()> {
        let snapshot = self.store.load_snapshot().await.map_err(|_| ())?;
        let outcome = sweep(snapshot, self.clock.utc());
        if outcome.changed() {
            self.store
                .persist(outcome.tickets)
                .await
                .map_err(|_| ())?;
        }
        Ok(outcome.escalated)
    }
}

/// Handle owning a running sweep task.
///
/// Dropping the handle aborts the task; [`shutdown`](Self::shutdown) stops
/// it cooperatively and waits for it to finish.
pub struct SweepHandle {
    shutdown: watch::Sender<bool>,
    stats: watch::Receiver<SweepStats>,
    join: Option<JoinHandle<()>>,
}

impl SweepHandle {
    /// Returns the counters as of the most recent pass.
    #[must_use]
    pub fn stats(&self) -> SweepStats {
        *self.stats.borrow()
    }

    /// Stops the sweep task and waits for it to exit.
    pub async fn shutdown(mut self) {
        let signalled = self.shutdown.send(true).is_ok();
        if let Some(join) = self.join.take() {
            if signalled {
                let _joined = join.await;
            } else {
                // The task already exited; nothing to wait for.
                join.abort();
            }
        }
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        if let Some(join) = &self.join {
            join.abort();
        }
    }
}
