//! Ticket lifecycle statuses and their linear order.

use super::ParseTicketStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket lifecycle status.
///
/// The first seven statuses form a linear progression; `NotApplicable` is an
/// absorbing side state reachable from any non-terminal status but outside
/// the linear order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Captured but not yet scheduled.
    Backlog,
    /// Scheduled for work.
    ToDo,
    /// Being worked on.
    InProgress,
    /// Awaiting review.
    Review,
    /// Under test.
    Test,
    /// Delivered, awaiting client feedback.
    WaitingForClient,
    /// Released and closed (terminal).
    ReleasedClosed,
    /// Declared not applicable (terminal, outside the linear order).
    NotApplicable,
}

impl TicketStatus {
    /// The linear progression of statuses, in workflow order.
    ///
    /// `NotApplicable` is deliberately absent: it has no position and is
    /// handled as its own branch by the transition rules.
    pub const LINEAR_ORDER: [Self; 7] = [
        Self::Backlog,
        Self::ToDo,
        Self::InProgress,
        Self::Review,
        Self::Test,
        Self::WaitingForClient,
        Self::ReleasedClosed,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::ToDo => "to_do",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Test => "test",
            Self::WaitingForClient => "waiting_for_client",
            Self::ReleasedClosed => "released_closed",
            Self::NotApplicable => "not_applicable",
        }
    }

    /// Returns the position of this status in the linear order, or `None`
    /// for `NotApplicable`.
    #[must_use]
    pub fn position(self) -> Option<usize> {
        Self::LINEAR_ORDER.iter().position(|status| *status == self)
    }

    /// Returns whether no transition may ever leave this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::ReleasedClosed | Self::NotApplicable)
    }
}

impl TryFrom<&str> for TicketStatus {
    type Error = ParseTicketStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "to_do" => Ok(Self::ToDo),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "test" => Ok(Self::Test),
            "waiting_for_client" => Ok(Self::WaitingForClient),
            "released_closed" => Ok(Self::ReleasedClosed),
            "not_applicable" => Ok(Self::NotApplicable),
            _ => Err(ParseTicketStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
