//! Pushtrack: ticket lifecycle workflow core.
//!
//! This crate provides the workflow engine of a ticket-management
//! application: a role-guarded state machine for ticket status transitions,
//! gated by per-state checklists, and a time-driven escalation automaton
//! that periodically advances a notification level on stale tickets. Both
//! engines mutate the same aggregate and share an append-only audit trail.
//!
//! # Architecture
//!
//! Pushtrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores)
//!
//! # Modules
//!
//! - [`workflow`]: Ticket aggregate, transition validation, board ordering
//! - [`escalation`]: Recurring sweep advancing escalation levels

pub mod escalation;
pub mod workflow;
