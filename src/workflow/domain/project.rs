//! Projects and their escalation reminder configuration.

use super::{ProjectKey, TicketDomainError};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// How often the level-0 reminder may fire, in whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderFrequency(u32);

impl ReminderFrequency {
    /// Creates a validated reminder frequency.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::InvalidReminderFrequency`] when the
    /// value is zero.
    pub const fn from_hours(hours: u32) -> Result<Self, TicketDomainError> {
        if hours == 0 {
            return Err(TicketDomainError::InvalidReminderFrequency);
        }
        Ok(Self(hours))
    }

    /// Returns the frequency in hours.
    #[must_use]
    pub const fn hours(self) -> u32 {
        self.0
    }

    /// Returns the frequency as a duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::hours(i64::from(self.0))
    }
}

/// Per-project escalation settings.
///
/// A project without a configuration never escalates its tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Minimum quiet period before the first reminder fires.
    pub reminder_frequency: ReminderFrequency,
}

impl NotificationConfig {
    /// Creates a configuration from a reminder frequency.
    #[must_use]
    pub const fn new(reminder_frequency: ReminderFrequency) -> Self {
        Self { reminder_frequency }
    }
}

/// Project owning a set of tickets.
///
/// Only the fields the workflow core consumes are modelled here; the full
/// project entity lives with the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    key: ProjectKey,
    name: String,
    notification_config: Option<NotificationConfig>,
}

impl Project {
    /// Creates a project without escalation settings.
    #[must_use]
    pub const fn new(key: ProjectKey, name: String) -> Self {
        Self {
            key,
            name,
            notification_config: None,
        }
    }

    /// Enables escalation with the given settings.
    #[must_use]
    pub const fn with_notification_config(mut self, config: NotificationConfig) -> Self {
        self.notification_config = Some(config);
        self
    }

    /// Returns the project key.
    #[must_use]
    pub const fn key(&self) -> &ProjectKey {
        &self.key
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the escalation settings, if enabled.
    #[must_use]
    pub const fn notification_config(&self) -> Option<&NotificationConfig> {
        self.notification_config.as_ref()
    }
}
