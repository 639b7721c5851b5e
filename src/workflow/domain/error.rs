//! Error types for ticket domain validation and parsing.

use super::status::TicketStatus;
use thiserror::Error;

/// Errors returned while constructing or mutating domain ticket values.
///
/// Denied transitions are not errors: they are structured decision data
/// returned by the validator. These variants cover caller misuse only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TicketDomainError {
    /// The ticket title is empty after trimming.
    #[error("ticket title must not be empty")]
    EmptyTitle,

    /// The project key is empty or contains whitespace.
    #[error("invalid project key '{0}'")]
    InvalidProjectKey(String),

    /// The actor identity is empty after trimming.
    #[error("invalid actor identity '{0}'")]
    InvalidActorId(String),

    /// The progress value lies outside 0..=100.
    #[error("invalid progress {0}, expected 0..=100")]
    InvalidProgress(u8),

    /// The escalation level lies outside 0..=3.
    #[error("invalid escalation level {0}, expected 0..=3")]
    InvalidEscalationLevel(u8),

    /// The reminder frequency is zero hours.
    #[error("reminder frequency must be at least one hour")]
    InvalidReminderFrequency,

    /// The checklist item is not configured for the ticket's status.
    #[error("checklist item '{item_id}' is not configured for status {status}")]
    UnknownChecklistItem {
        /// The unconfigured item identifier.
        item_id: String,
        /// The ticket's status at the time of the toggle.
        status: TicketStatus,
    },

    /// A denied decision was handed to the commit path.
    #[error("transition from {from} to {to} was not permitted")]
    TransitionNotPermitted {
        /// Status the decision was evaluated from.
        from: TicketStatus,
        /// Requested target status.
        to: TicketStatus,
    },

    /// The decision was evaluated against a different current status.
    #[error("decision was evaluated from {evaluated_from} but the ticket is at {actual}")]
    DecisionOutdated {
        /// Status the decision was evaluated from.
        evaluated_from: TicketStatus,
        /// The ticket's actual current status.
        actual: TicketStatus,
    },

    /// The decision requires a recorded reason and none was supplied.
    #[error("a reason is required to move to {to}")]
    ReasonRequired {
        /// Requested target status.
        to: TicketStatus,
    },
}

/// Error returned while parsing ticket statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown ticket status: {0}")]
pub struct ParseTicketStatusError(pub String);
