//! Adapter implementations of the escalation ports.

mod memory;

pub use memory::InMemorySweepStore;
