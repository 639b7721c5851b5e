//! Domain model for ticket lifecycle management.
//!
//! The ticket domain models the status state machine, per-status checklists,
//! the append-only audit trail, and escalation bookkeeping while keeping all
//! infrastructure concerns outside of the domain boundary.

mod actor;
mod audit;
mod checklist;
mod error;
mod ids;
mod project;
mod status;
mod ticket;

pub use actor::{ActingUser, ActorId, ActorRole};
pub use audit::{AuditEntry, ChecklistOutcome, InvocationContext};
pub use checklist::{ChecklistConfig, ChecklistItem, ChecklistMark, ChecklistState};
pub use error::{ParseTicketStatusError, TicketDomainError};
pub use ids::{ProjectKey, TicketId};
pub use project::{NotificationConfig, Project, ReminderFrequency};
pub use status::TicketStatus;
pub use ticket::{
    ApprovedTransition, EscalationLevel, OrderKey, PersistedTicketData, Progress, Ticket,
};
