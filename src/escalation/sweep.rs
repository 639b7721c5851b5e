//! One pure pass of the escalation automaton.

use crate::workflow::domain::{NotificationConfig, Project, ProjectKey, Ticket};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// The ticket and project collections as they exist at the moment a sweep
/// fires.
///
/// Schedulers must rebuild this on every tick rather than reusing a copy
/// captured at subscription time, so a sweep never acts on data superseded
/// by a concurrent interactive mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepSnapshot {
    /// All known tickets, eligible or not.
    pub tickets: Vec<Ticket>,
    /// All known projects; only those with a notification configuration
    /// take part in escalation.
    pub projects: Vec<Project>,
}

impl SweepSnapshot {
    /// Bundles tickets and projects into a snapshot.
    #[must_use]
    pub const fn new(tickets: Vec<Ticket>, projects: Vec<Project>) -> Self {
        Self { tickets, projects }
    }
}

/// Result of one sweep pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    /// The next ticket collection; untouched tickets keep their value.
    pub tickets: Vec<Ticket>,
    /// How many tickets advanced an escalation level this pass.
    pub escalated: usize,
}

impl SweepOutcome {
    /// Returns whether the pass changed anything.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.escalated > 0
    }
}

/// Runs one escalation pass over the snapshot.
///
/// Tickets are processed sequentially and independently, so each ticket sees
/// at most one mutation per pass. Ineligible tickets (terminal, archived,
/// trashed, unassigned, or owned by a project without a notification
/// configuration) pass through untouched; "not yet due" is a steady state,
/// not a fault, and the sweep never errors.
#[must_use]
pub fn sweep(snapshot: SweepSnapshot, now: DateTime<Utc>) -> SweepOutcome {
    let configs: HashMap<&ProjectKey, &NotificationConfig> = snapshot
        .projects
        .iter()
        .filter_map(|project| {
            project
                .notification_config()
                .map(|config| (project.key(), config))
        })
        .collect();

    let mut escalated = 0;
    let tickets = snapshot
        .tickets
        .into_iter()
        .map(|ticket| match configs.get(ticket.project_key()) {
            Some(config) => {
                let (next, changed) = ticket.escalate_if_due(config, now);
                if changed {
                    escalated += 1;
                }
                next
            }
            None => ticket,
        })
        .collect();

    SweepOutcome { tickets, escalated }
}
