//! Ticket aggregate root and its value-in/value-out mutators.
//!
//! Every mutator consumes the ticket and returns the next value, and every
//! accepted mutation exits through one private audit prepend. "One mutation,
//! one audit entry" is therefore a structural guarantee, not a convention.

use super::{
    ActorId, AuditEntry, ChecklistConfig, ChecklistMark, ChecklistOutcome, ChecklistState,
    InvocationContext, NotificationConfig, ProjectKey, TicketDomainError, TicketId, TicketStatus,
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion percentage of the current status, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// No recorded progress.
    pub const ZERO: Self = Self(0);

    /// Creates a validated progress value.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::InvalidProgress`] when the value
    /// exceeds 100.
    pub const fn new(value: u8) -> Result<Self, TicketDomainError> {
        if value > 100 {
            return Err(TicketDomainError::InvalidProgress(value));
        }
        Ok(Self(value))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// How many unacknowledged reminder/escalation notices have fired, 0..=3.
///
/// The level never decreases except through the explicit progress-triggered
/// reset, and never exceeds 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EscalationLevel(u8);

impl EscalationLevel {
    const MAX_VALUE: u8 = 3;

    /// No notice has fired.
    pub const NONE: Self = Self(0);

    /// Creates a validated escalation level.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::InvalidEscalationLevel`] when the value
    /// exceeds 3.
    pub const fn new(value: u8) -> Result<Self, TicketDomainError> {
        if value > Self::MAX_VALUE {
            return Err(TicketDomainError::InvalidEscalationLevel(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns whether the level is at its cap.
    #[must_use]
    pub const fn is_max(self) -> bool {
        self.0 == Self::MAX_VALUE
    }

    const fn next(self) -> Self {
        if self.0 >= Self::MAX_VALUE {
            Self(Self::MAX_VALUE)
        } else {
            Self(self.0 + 1)
        }
    }
}

/// Fractional ordering key placing a ticket within its board column.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderKey(f64);

impl OrderKey {
    /// Wraps a raw key value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Derives a key from a timestamp, used when a column is empty.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Epoch milliseconds fit f64's exact integer range for any realistic date"
    )]
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis() as f64)
    }

    /// Returns the raw key value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// A transition the validator has allowed, ready to commit.
///
/// Values of this type are only constructed by the transition validator, so
/// a denied decision structurally cannot reach the commit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedTransition {
    from: TicketStatus,
    to: TicketStatus,
    reason_required: bool,
    admin_override: bool,
    checklist_complete: bool,
    context: InvocationContext,
}

impl ApprovedTransition {
    pub(crate) const fn new(
        from: TicketStatus,
        to: TicketStatus,
        reason_required: bool,
        admin_override: bool,
        checklist_complete: bool,
        context: InvocationContext,
    ) -> Self {
        Self {
            from,
            to,
            reason_required,
            admin_override,
            checklist_complete,
            context,
        }
    }

    /// Status the transition was evaluated from.
    #[must_use]
    pub const fn from(&self) -> TicketStatus {
        self.from
    }

    /// Target status of the transition.
    #[must_use]
    pub const fn to(&self) -> TicketStatus {
        self.to
    }

    /// Whether committing requires a recorded reason.
    #[must_use]
    pub const fn reason_required(&self) -> bool {
        self.reason_required
    }

    /// Whether the move rides on an admin override.
    #[must_use]
    pub const fn admin_override(&self) -> bool {
        self.admin_override
    }
}

/// Ticket aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    project_key: ProjectKey,
    title: String,
    status: TicketStatus,
    reporter: ActorId,
    responsible: Option<ActorId>,
    product_owner: Option<ActorId>,
    checklist: ChecklistState,
    audit_trail: Vec<AuditEntry>,
    escalation_level: EscalationLevel,
    last_notified_at: Option<DateTime<Utc>>,
    progress: Progress,
    board_order: OrderKey,
    archived: bool,
    trashed_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted ticket aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTicketData {
    /// Persisted ticket identifier.
    pub id: TicketId,
    /// Persisted owning-project key.
    pub project_key: ProjectKey,
    /// Persisted title.
    pub title: String,
    /// Persisted lifecycle status.
    pub status: TicketStatus,
    /// Persisted reporter identity.
    pub reporter: ActorId,
    /// Persisted responsible identity, if assigned.
    pub responsible: Option<ActorId>,
    /// Persisted product-owner identity, if assigned.
    pub product_owner: Option<ActorId>,
    /// Persisted checklist progress.
    pub checklist: ChecklistState,
    /// Persisted audit trail, newest first.
    pub audit_trail: Vec<AuditEntry>,
    /// Persisted escalation level.
    pub escalation_level: EscalationLevel,
    /// Persisted timestamp of the last escalation anchor, if any.
    pub last_notified_at: Option<DateTime<Utc>>,
    /// Persisted progress percentage.
    pub progress: Progress,
    /// Persisted board ordering key.
    pub board_order: OrderKey,
    /// Persisted archive flag.
    pub archived: bool,
    /// Persisted trash timestamp, if trashed.
    pub trashed_at: Option<DateTime<Utc>>,
    /// Persisted close timestamp, if closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Quiet period after the level-1 anchor before level 2 fires.
    const LEVEL_2_DELAY_HOURS: i64 = 3;
    /// Quiet period after the level-1 anchor before level 3 fires.
    const LEVEL_3_DELAY_HOURS: i64 = 24;

    /// Creates a new ticket in `Backlog` with an empty checklist and audit
    /// trail.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::EmptyTitle`] if the title is empty after
    /// trimming.
    pub fn new(
        project_key: ProjectKey,
        title: impl Into<String>,
        reporter: ActorId,
        clock: &impl Clock,
    ) -> Result<Self, TicketDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TicketDomainError::EmptyTitle);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TicketId::new(),
            project_key,
            title,
            status: TicketStatus::Backlog,
            reporter,
            responsible: None,
            product_owner: None,
            checklist: ChecklistState::new(),
            audit_trail: Vec::new(),
            escalation_level: EscalationLevel::NONE,
            last_notified_at: None,
            progress: Progress::ZERO,
            board_order: OrderKey::from_datetime(timestamp),
            archived: false,
            trashed_at: None,
            closed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a ticket from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTicketData) -> Self {
        Self {
            id: data.id,
            project_key: data.project_key,
            title: data.title,
            status: data.status,
            reporter: data.reporter,
            responsible: data.responsible,
            product_owner: data.product_owner,
            checklist: data.checklist,
            audit_trail: data.audit_trail,
            escalation_level: data.escalation_level,
            last_notified_at: data.last_notified_at,
            progress: data.progress,
            board_order: data.board_order,
            archived: data.archived,
            trashed_at: data.trashed_at,
            closed_at: data.closed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Assigns the responsible actor (setup, not audited).
    #[must_use]
    pub fn with_responsible(mut self, responsible: ActorId) -> Self {
        self.responsible = Some(responsible);
        self
    }

    /// Assigns the product owner (setup, not audited).
    #[must_use]
    pub fn with_product_owner(mut self, product_owner: ActorId) -> Self {
        self.product_owner = Some(product_owner);
        self
    }

    /// Returns the ticket identifier.
    #[must_use]
    pub const fn id(&self) -> TicketId {
        self.id
    }

    /// Returns the owning-project key.
    #[must_use]
    pub const fn project_key(&self) -> &ProjectKey {
        &self.project_key
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TicketStatus {
        self.status
    }

    /// Returns the reporter identity.
    #[must_use]
    pub const fn reporter(&self) -> &ActorId {
        &self.reporter
    }

    /// Returns the responsible identity, if assigned.
    #[must_use]
    pub const fn responsible(&self) -> Option<&ActorId> {
        self.responsible.as_ref()
    }

    /// Returns the product-owner identity, if assigned.
    #[must_use]
    pub const fn product_owner(&self) -> Option<&ActorId> {
        self.product_owner.as_ref()
    }

    /// Returns the checklist progress.
    #[must_use]
    pub const fn checklist(&self) -> &ChecklistState {
        &self.checklist
    }

    /// Returns the audit trail, newest entry first.
    #[must_use]
    pub fn audit_trail(&self) -> &[AuditEntry] {
        &self.audit_trail
    }

    /// Returns the escalation level.
    #[must_use]
    pub const fn escalation_level(&self) -> EscalationLevel {
        self.escalation_level
    }

    /// Returns the escalation anchor timestamp, if one is set.
    #[must_use]
    pub const fn last_notified_at(&self) -> Option<DateTime<Utc>> {
        self.last_notified_at
    }

    /// Returns the progress percentage.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the board ordering key.
    #[must_use]
    pub const fn board_order(&self) -> OrderKey {
        self.board_order
    }

    /// Returns whether the ticket is archived.
    #[must_use]
    pub const fn archived(&self) -> bool {
        self.archived
    }

    /// Returns the trash timestamp, if the ticket is in the trash.
    #[must_use]
    pub const fn trashed_at(&self) -> Option<DateTime<Utc>> {
        self.trashed_at
    }

    /// Returns the close timestamp, if the ticket reached a terminal status.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Commits an approved transition.
    ///
    /// Sets the new status, resets `progress` to zero for the new state,
    /// stamps `closed_at` on first entry into a terminal status, applies the
    /// new board position when one is supplied, and appends the transition
    /// audit entry. The escalation level is deliberately left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::DecisionOutdated`] when the approval was
    /// evaluated against a different current status, or
    /// [`TicketDomainError::ReasonRequired`] when the approval demands a
    /// reason and none was supplied.
    pub fn commit_transition(
        mut self,
        approved: &ApprovedTransition,
        actor: &ActorId,
        reason: Option<&str>,
        order: Option<OrderKey>,
        clock: &impl Clock,
    ) -> Result<Self, TicketDomainError> {
        if approved.from != self.status {
            return Err(TicketDomainError::DecisionOutdated {
                evaluated_from: approved.from,
                actual: self.status,
            });
        }
        if approved.reason_required && reason.is_none() {
            return Err(TicketDomainError::ReasonRequired { to: approved.to });
        }

        let now = clock.utc();
        let mut detail = format!("Moved from {} to {}.", approved.from, approved.to);
        if let Some(reason_text) = reason {
            detail.push_str(&format!(" Reason: {reason_text}."));
        }
        if approved.admin_override {
            detail.push_str(" Admin override of an incomplete checklist.");
        }

        let outcome = if approved.checklist_complete {
            ChecklistOutcome::Complete
        } else {
            ChecklistOutcome::Incomplete
        };
        let mut entry = AuditEntry::new("Status changed", actor.clone(), now, detail)
            .with_checklist_outcome(outcome)
            .with_method(approved.context);
        if approved.admin_override {
            entry = entry.with_admin_override();
        }

        self.status = approved.to;
        self.progress = Progress::ZERO;
        if approved.to.is_terminal() && self.closed_at.is_none() {
            self.closed_at = Some(now);
        }
        if let Some(new_order) = order {
            self.board_order = new_order;
        }
        Ok(self.logged(entry))
    }

    /// Toggles one checklist item for the current status.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::UnknownChecklistItem`] when the item is
    /// not configured for the ticket's current status.
    pub fn set_checklist_item(
        mut self,
        config: &ChecklistConfig,
        item_id: &str,
        checked: bool,
        actor: &ActorId,
        clock: &impl Clock,
    ) -> Result<Self, TicketDomainError> {
        let Some(item) = config.item(self.status, item_id) else {
            return Err(TicketDomainError::UnknownChecklistItem {
                item_id: item_id.to_owned(),
                status: self.status,
            });
        };

        let now = clock.utc();
        let verb = if checked { "done" } else { "not done" };
        let detail = format!("Marked '{}' as {verb}.", item.label);
        let entry = AuditEntry::new("Checklist updated", actor.clone(), now, detail);

        self.checklist
            .set(item_id, ChecklistMark::new(checked, actor.clone(), now));
        Ok(self.logged(entry))
    }

    /// Records a progress update and restarts the escalation clock.
    ///
    /// Sets the percentage, resets the escalation level to zero, and moves
    /// the notification anchor to now.
    #[must_use]
    pub fn record_progress(
        mut self,
        progress: Progress,
        actor: &ActorId,
        note: Option<&str>,
        clock: &impl Clock,
    ) -> Self {
        let now = clock.utc();
        let mut detail = format!("Progress set to {progress}.");
        if let Some(note_text) = note {
            detail.push_str(&format!(" Comment: \"{note_text}\""));
        }
        let entry = AuditEntry::new("Progress updated", actor.clone(), now, detail);

        self.progress = progress;
        self.escalation_level = EscalationLevel::NONE;
        self.last_notified_at = Some(now);
        self.logged(entry)
    }

    /// Moves the ticket within its current column.
    ///
    /// Same-column reordering does not touch the status and needs no
    /// transition decision.
    #[must_use]
    pub fn reordered(mut self, order: OrderKey, actor: &ActorId, clock: &impl Clock) -> Self {
        let now = clock.utc();
        let detail = format!("Position changed within {}.", self.status);
        let entry = AuditEntry::new("Board reordered", actor.clone(), now, detail)
            .with_method(InvocationContext::Board);

        self.board_order = order;
        self.logged(entry)
    }

    /// Archives or restores the ticket.
    #[must_use]
    pub fn set_archived(mut self, archived: bool, actor: &ActorId, clock: &impl Clock) -> Self {
        let now = clock.utc();
        let (event, detail) = if archived {
            ("Archived", "Moved to the archive.")
        } else {
            ("Restored", "Moved back to the inbox.")
        };
        let entry = AuditEntry::new(event, actor.clone(), now, detail);

        self.archived = archived;
        self.logged(entry)
    }

    /// Advances the escalation level if the ticket is eligible and a notice
    /// is due, returning the next ticket value and whether it changed.
    ///
    /// The first matching rule applies: level 0 fires after the project's
    /// reminder frequency (an unset anchor counts as overdue), level 1 after
    /// 3 hours and level 2 after 24 hours. The anchor is only moved at the
    /// level-1 reminder, so the later thresholds are cumulative from that
    /// first notice.
    #[must_use]
    pub fn escalate_if_due(
        mut self,
        config: &NotificationConfig,
        now: DateTime<Utc>,
    ) -> (Self, bool) {
        if self.status.is_terminal()
            || self.archived
            || self.trashed_at.is_some()
            || self.responsible.is_none()
        {
            return (self, false);
        }

        let elapsed = self.last_notified_at.map(|anchor| now - anchor);
        let overdue =
            |threshold: Duration| elapsed.is_none_or(|since_anchor| since_anchor > threshold);

        match self.escalation_level.value() {
            0 if elapsed
                .is_none_or(|since_anchor| since_anchor >= config.reminder_frequency.as_duration()) =>
            {
                let responsible = self
                    .responsible
                    .as_ref()
                    .map(ActorId::as_str)
                    .unwrap_or_default()
                    .to_owned();
                self.last_notified_at = Some(now);
                (
                    self.bump_escalation(
                        now,
                        format!("[notice 1] Requested a status update from {responsible}."),
                    ),
                    true,
                )
            }
            1 if overdue(Duration::hours(Self::LEVEL_2_DELAY_HOURS)) => {
                let recipients = self.leader_recipients();
                (
                    self.bump_escalation(
                        now,
                        format!("[notice 2] Ticket unanswered for over 3 hours. Notified {recipients}."),
                    ),
                    true,
                )
            }
            2 if overdue(Duration::hours(Self::LEVEL_3_DELAY_HOURS)) => {
                let owner = self
                    .product_owner
                    .as_ref()
                    .unwrap_or(&self.reporter)
                    .to_string();
                let completed = self.checklist.completed_ids();
                let snapshot = if completed.is_empty() {
                    "none".to_owned()
                } else {
                    completed.join(", ")
                };
                (
                    self.bump_escalation(
                        now,
                        format!(
                            "[notice 3] Critical ticket unanswered for over 24 hours. \
                             Notified {owner}. Completed checklist items: {snapshot}."
                        ),
                    ),
                    true,
                )
            }
            _ => (self, false),
        }
    }

    fn leader_recipients(&self) -> String {
        let mut recipients: Vec<&str> = Vec::new();
        if let Some(owner) = &self.product_owner {
            recipients.push(owner.as_str());
        }
        recipients.push(self.reporter.as_str());
        recipients.join(", ")
    }

    fn bump_escalation(mut self, now: DateTime<Utc>, detail: String) -> Self {
        self.escalation_level = self.escalation_level.next();
        let event = format!("Escalation notice {}", self.escalation_level.value());
        let entry = AuditEntry::new(event, ActorId::system(), now, detail);
        self.logged(entry)
    }

    /// Prepends one audit entry and refreshes the mutation timestamp. Every
    /// accepted mutation exits through here exactly once.
    fn logged(mut self, entry: AuditEntry) -> Self {
        self.updated_at = entry.at;
        self.audit_trail.insert(0, entry);
        self
    }
}
