//! Acting users and their global roles.

use super::TicketDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Email-style identity of an acting user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Identity used for automated mutations such as escalation notices.
    const SYSTEM: &'static str = "system";

    /// Creates a validated actor identity.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::InvalidActorId`] if the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TicketDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TicketDomainError::InvalidActorId(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identity the escalation sweep acts under.
    #[must_use]
    pub fn system() -> Self {
        Self(Self::SYSTEM.to_owned())
    }

    /// Returns the identity as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ActorId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Global role of an acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Full workflow control, including checklist overrides from the board.
    Admin,
    /// May advance tickets when the checklist gate passes.
    Leader,
    /// Logs progress; may only step tickets backward.
    Collaborator,
    /// External client; no transition rights.
    Client,
    /// Read-only observer; no transition rights.
    Viewer,
}

impl ActorRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Leader => "leader",
            Self::Collaborator => "collaborator",
            Self::Client => "client",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and role of the user proposing a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingUser {
    /// Who is acting.
    pub id: ActorId,
    /// Their global role.
    pub role: ActorRole,
}

impl ActingUser {
    /// Pairs an identity with its role.
    #[must_use]
    pub const fn new(id: ActorId, role: ActorRole) -> Self {
        Self { id, role }
    }
}
