//! Unit tests for the escalation module.
//!
//! The pure sweep pass is tested with explicit timestamps; the scheduler is
//! tested on a paused tokio clock.

mod fixtures;
mod scheduler_tests;
