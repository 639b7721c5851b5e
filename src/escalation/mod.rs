//! Time-driven escalation for Pushtrack tickets.
//!
//! A recurring sweep walks every active ticket and advances its escalation
//! level when the project's reminder frequency (and then fixed 3-hour and
//! 24-hour thresholds) has elapsed without a progress update. The sweep is
//! pure; the scheduler owns the timer, re-resolves the snapshot through the
//! store port on every tick and persists the result.
//!
//! - Pure sweep pass in [`sweep`]
//! - Store port in [`ports`]
//! - In-memory adapter in [`adapters`]
//! - Timer-owning scheduler in [`services`]

pub mod adapters;
pub mod ports;
pub mod services;
pub mod sweep;

#[cfg(test)]
mod tests;
