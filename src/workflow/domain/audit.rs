//! Immutable audit entries recorded for every accepted ticket mutation.

use super::ActorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Checklist completeness observed when a transition was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistOutcome {
    /// Every configured item for the source status was checked.
    Complete,
    /// At least one configured item was unchecked.
    Incomplete,
}

/// Surface a transition was requested from.
///
/// The admin checklist override is only available from the board, so the
/// invocation surface is part of the validator input and is recorded on the
/// resulting audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationContext {
    /// Drag-and-drop move on the Kanban board.
    Board,
    /// Form-driven edit of the ticket.
    Form,
    /// Quick action from a context menu.
    Menu,
}

/// One immutable, timestamped record of a state-affecting action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Short event name, e.g. `Status changed`.
    pub event: String,
    /// Who performed the action.
    pub actor: ActorId,
    /// When the action happened.
    pub at: DateTime<Utc>,
    /// Free-form description of the action.
    pub detail: String,
    /// Checklist completeness at decision time, for transitions.
    pub checklist_outcome: Option<ChecklistOutcome>,
    /// Set when an admin override let the move through an incomplete gate.
    pub admin_override: Option<bool>,
    /// Surface the action was invoked from, when known.
    pub method: Option<InvocationContext>,
}

impl AuditEntry {
    /// Creates an entry with the required fields.
    #[must_use]
    pub fn new(
        event: impl Into<String>,
        actor: ActorId,
        at: DateTime<Utc>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            event: event.into(),
            actor,
            at,
            detail: detail.into(),
            checklist_outcome: None,
            admin_override: None,
            method: None,
        }
    }

    /// Records the checklist completeness observed at decision time.
    #[must_use]
    pub const fn with_checklist_outcome(mut self, outcome: ChecklistOutcome) -> Self {
        self.checklist_outcome = Some(outcome);
        self
    }

    /// Marks the entry as the result of an admin override.
    #[must_use]
    pub const fn with_admin_override(mut self) -> Self {
        self.admin_override = Some(true);
        self
    }

    /// Records the surface the action was invoked from.
    #[must_use]
    pub const fn with_method(mut self, method: InvocationContext) -> Self {
        self.method = Some(method);
        self
    }
}
