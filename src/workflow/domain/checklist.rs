//! Per-status checklists and the completeness gate.
//!
//! Each status carries a static ordered list of required items. A ticket's
//! checklist state maps item identifiers to marks; completeness for a status
//! is fully determined by that map and the configured items, independent of
//! the order in which items were checked.

use super::{ActorId, TicketStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named, per-status required step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Stable identifier, unique within the whole configuration.
    pub id: String,
    /// Human-readable label used in error reporting and audit details.
    pub label: String,
}

impl ChecklistItem {
    /// Creates an item from its identifier and label.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Progress mark for a single checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistMark {
    /// Whether the item is done.
    pub checked: bool,
    /// Who toggled the item last.
    pub by: ActorId,
    /// When the item was toggled last.
    pub at: DateTime<Utc>,
}

impl ChecklistMark {
    /// Creates a mark recording who toggled the item and when.
    #[must_use]
    pub const fn new(checked: bool, by: ActorId, at: DateTime<Utc>) -> Self {
        Self { checked, by, at }
    }
}

/// A ticket's checklist progress, keyed by item identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistState {
    marks: HashMap<String, ChecklistMark>,
}

impl ChecklistState {
    /// Creates an empty checklist state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the given item is currently checked.
    #[must_use]
    pub fn is_checked(&self, item_id: &str) -> bool {
        self.marks.get(item_id).is_some_and(|mark| mark.checked)
    }

    /// Returns the mark for the given item, if any.
    #[must_use]
    pub fn mark(&self, item_id: &str) -> Option<&ChecklistMark> {
        self.marks.get(item_id)
    }

    /// Sets or replaces the mark for an item.
    pub fn set(&mut self, item_id: impl Into<String>, mark: ChecklistMark) {
        self.marks.insert(item_id.into(), mark);
    }

    /// Returns the identifiers of all checked items, sorted for stable
    /// reporting.
    #[must_use]
    pub fn completed_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .marks
            .iter()
            .filter(|(_, mark)| mark.checked)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// Static table of required checklist items per status.
///
/// Built once at startup and never mutated afterwards. A status with no
/// configured items is trivially complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistConfig {
    items: HashMap<TicketStatus, Vec<ChecklistItem>>,
}

impl ChecklistConfig {
    /// Creates a configuration with no required items for any status.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replaces the required items for one status.
    #[must_use]
    pub fn with_items(
        mut self,
        status: TicketStatus,
        items: impl IntoIterator<Item = ChecklistItem>,
    ) -> Self {
        self.items.insert(status, items.into_iter().collect());
        self
    }

    /// The standard Pushtrack checklist table.
    #[must_use]
    pub fn standard() -> Self {
        let item = ChecklistItem::new;
        Self::empty()
            .with_items(
                TicketStatus::Backlog,
                [
                    item("backlog_desc", "Problem description captured"),
                    item("backlog_justify", "Business justification recorded"),
                    item("backlog_refs", "Reference material linked"),
                    item("backlog_stakeholders", "Stakeholders identified"),
                    item("backlog_viability", "Viability assessed"),
                ],
            )
            .with_items(
                TicketStatus::ToDo,
                [
                    item("todo_reqs", "Requirements agreed"),
                    item("todo_docs", "Supporting documents attached"),
                    item("todo_assignee", "Assignee confirmed"),
                    item("todo_estimate", "Effort estimated"),
                    item("todo_leader_validation", "Validated by the team leader"),
                ],
            )
            .with_items(
                TicketStatus::InProgress,
                [
                    item("inprogress_time", "Time tracking started"),
                    item("inprogress_log", "Work log kept up to date"),
                    item("inprogress_evidence", "Evidence attached"),
                    item("inprogress_commits", "Commits linked"),
                    item("inprogress_risks", "Risks recorded"),
                ],
            )
            .with_items(
                TicketStatus::Review,
                [
                    item("review_verify", "Deliverable verified"),
                    item("review_feedback", "Feedback collected"),
                    item("review_adjustments", "Adjustments applied"),
                    item("review_confirm", "Reviewer sign-off confirmed"),
                ],
            )
            .with_items(
                TicketStatus::Test,
                [
                    item("test_unit", "Unit tests passing"),
                    item("test_integration", "Integration tests passing"),
                    item("test_results", "Results recorded"),
                    item("test_evidence", "Test evidence attached"),
                    item("test_validation", "QA validation complete"),
                ],
            )
            .with_items(
                TicketStatus::WaitingForClient,
                [
                    item("waiting_delivery", "Delivery handed over"),
                    item("waiting_feedback", "Client feedback requested"),
                    item("waiting_improvements", "Improvement requests triaged"),
                    item("waiting_approval", "Client approval received"),
                ],
            )
            .with_items(
                TicketStatus::ReleasedClosed,
                [
                    item("closed_satisfaction", "Satisfaction survey sent"),
                    item("closed_docs", "Documentation archived"),
                    item("closed_invoice", "Invoicing completed"),
                    item("closed_archive", "Ticket archived"),
                ],
            )
            .with_items(
                TicketStatus::NotApplicable,
                [
                    item("na_justify", "Justification recorded"),
                    item("na_notify", "Stakeholders notified"),
                    item("na_archive", "Material archived"),
                    item("na_close", "Ticket closed out"),
                ],
            )
    }

    /// Returns the required items for a status, in configuration order.
    #[must_use]
    pub fn items(&self, status: TicketStatus) -> &[ChecklistItem] {
        self.items.get(&status).map_or(&[], Vec::as_slice)
    }

    /// Looks up a configured item for a status by identifier.
    #[must_use]
    pub fn item(&self, status: TicketStatus, item_id: &str) -> Option<&ChecklistItem> {
        self.items(status).iter().find(|item| item.id == item_id)
    }

    /// Returns whether every configured item for `status` is checked.
    #[must_use]
    pub fn is_complete(&self, status: TicketStatus, state: &ChecklistState) -> bool {
        self.items(status)
            .iter()
            .all(|item| state.is_checked(&item.id))
    }

    /// Returns the configured items for `status` that are not yet checked,
    /// in configuration order.
    #[must_use]
    pub fn missing_items(&self, status: TicketStatus, state: &ChecklistState) -> Vec<&ChecklistItem> {
        self.items(status)
            .iter()
            .filter(|item| !state.is_checked(&item.id))
            .collect()
    }
}
