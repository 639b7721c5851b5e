//! Shared builders for escalation tests.

use crate::workflow::domain::{
    ActorId, ChecklistState, EscalationLevel, NotificationConfig, OrderKey, PersistedTicketData,
    Progress, Project, ProjectKey, ReminderFrequency, Ticket, TicketDomainError, TicketId,
    TicketStatus,
};
use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;

/// Deterministic timestamp `hours` hours after the Unix epoch.
pub(super) fn moment(hours: i64) -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + Duration::hours(hours)
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub(super) const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A project escalating after `reminder_hours` quiet hours.
pub(super) fn project(key: &str, reminder_hours: u32) -> Result<Project, TicketDomainError> {
    let config = NotificationConfig::new(ReminderFrequency::from_hours(reminder_hours)?);
    Ok(Project::new(ProjectKey::new(key)?, format!("Project {key}"))
        .with_notification_config(config))
}

/// Persisted data for an in-progress, assigned ticket at the given
/// escalation level and anchor. Tests tweak fields before reconstructing.
pub(super) fn persisted(
    key: &str,
    level: u8,
    anchor: Option<DateTime<Utc>>,
) -> Result<PersistedTicketData, TicketDomainError> {
    let created = moment(0);
    Ok(PersistedTicketData {
        id: TicketId::new(),
        project_key: ProjectKey::new(key)?,
        title: "Escalation test subject".to_owned(),
        status: TicketStatus::InProgress,
        reporter: ActorId::new("reporter@example.com")?,
        responsible: Some(ActorId::new("worker@example.com")?),
        product_owner: Some(ActorId::new("owner@example.com")?),
        checklist: ChecklistState::new(),
        audit_trail: Vec::new(),
        escalation_level: EscalationLevel::new(level)?,
        last_notified_at: anchor,
        progress: Progress::ZERO,
        board_order: OrderKey::new(1000.0),
        archived: false,
        trashed_at: None,
        closed_at: None,
        created_at: created,
        updated_at: created,
    })
}

/// An in-progress, assigned ticket at the given escalation level and anchor.
pub(super) fn ticket(
    key: &str,
    level: u8,
    anchor: Option<DateTime<Utc>>,
) -> Result<Ticket, TicketDomainError> {
    Ok(Ticket::from_persisted(persisted(key, level, anchor)?))
}
