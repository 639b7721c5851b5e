//! Port contracts for the escalation sweep.

mod store;

pub use store::{SweepStore, SweepStoreError, SweepStoreResult};
