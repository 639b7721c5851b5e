//! Orchestration services for the escalation sweep.

mod scheduler;

pub use scheduler::{EscalationScheduler, SweepHandle, SweepStats};
