//! End-to-end lifecycle test: gate a ticket through the checklist, advance
//! it, record progress, and escalate it through the sweep.

use chrono::Duration;
use eyre::{bail, ensure};
use mockable::{Clock, DefaultClock};
use pushtrack::escalation::sweep::{SweepSnapshot, sweep};
use pushtrack::workflow::domain::{
    ActingUser, ActorId, ActorRole, ChecklistConfig, EscalationLevel, InvocationContext,
    NotificationConfig, Progress, Project, ProjectKey, ReminderFrequency, Ticket, TicketStatus,
};
use pushtrack::workflow::services::TransitionService;
use pushtrack::workflow::validation::DenialKind;
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn service() -> TransitionService<DefaultClock> {
    TransitionService::new(Arc::new(ChecklistConfig::standard()), Arc::new(DefaultClock))
}

#[rstest]
fn ticket_travels_from_backlog_through_gate_progress_and_escalation(
    clock: DefaultClock,
    service: TransitionService<DefaultClock>,
) -> eyre::Result<()> {
    let reporter = ActorId::new("reporter@example.com")?;
    let worker = ActorId::new("worker@example.com")?;
    let leader = ActingUser::new(ActorId::new("leader@example.com")?, ActorRole::Leader);

    let project_key = ProjectKey::new("PRJ-001")?;
    let project = Project::new(project_key.clone(), "Integration".to_owned())
        .with_notification_config(NotificationConfig::new(ReminderFrequency::from_hours(2)?));

    let ticket = Ticket::new(project_key, "Ship the onboarding flow", reporter, &clock)?
        .with_responsible(worker.clone());

    // The checklist gate blocks the first advance.
    let blocked = service.evaluate(
        &ticket,
        TicketStatus::ToDo,
        Some(&leader),
        InvocationContext::Board,
    );
    ensure!(blocked.denial_kind() == Some(DenialKind::ChecklistIncomplete));

    // Work through every backlog item, then advance.
    let backlog_items: Vec<String> = service
        .checklist_config()
        .items(TicketStatus::Backlog)
        .iter()
        .map(|item| item.id.clone())
        .collect();
    let mut ticket = ticket;
    for item_id in &backlog_items {
        ticket =
            ticket.set_checklist_item(service.checklist_config(), item_id, true, &worker, &clock)?;
    }

    let decision = service.evaluate(
        &ticket,
        TicketStatus::ToDo,
        Some(&leader),
        InvocationContext::Board,
    );
    ensure!(decision.allowed);
    let ticket = service.commit(ticket, &decision, &leader.id, None, None)?;
    ensure!(ticket.status() == TicketStatus::ToDo);
    ensure!(ticket.progress() == Progress::ZERO);

    // Progress restarts the escalation clock.
    let ticket = ticket.record_progress(Progress::new(30)?, &worker, Some("kickoff"), &clock);
    ensure!(ticket.escalation_level() == EscalationLevel::NONE);

    // Freshly updated: the sweep leaves the ticket alone.
    let now = clock.utc();
    let quiet = sweep(
        SweepSnapshot::new(vec![ticket.clone()], vec![project.clone()]),
        now + Duration::hours(1),
    );
    ensure!(!quiet.changed());

    // Past the reminder frequency the first notice fires.
    let overdue = sweep(
        SweepSnapshot::new(quiet.tickets, vec![project]),
        now + Duration::hours(3),
    );
    ensure!(overdue.escalated == 1);
    let Some(escalated) = overdue.tickets.first() else {
        bail!("expected the swept ticket");
    };
    ensure!(escalated.escalation_level() == EscalationLevel::new(1)?);
    let Some(entry) = escalated.audit_trail().first() else {
        bail!("expected an escalation audit entry");
    };
    ensure!(entry.event == "Escalation notice 1");
    ensure!(entry.actor == ActorId::system());
    Ok(())
}

#[rstest]
fn collaborator_cannot_advance_but_can_step_back_with_a_reason(
    service: TransitionService<DefaultClock>,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let reporter = ActorId::new("reporter@example.com")?;
    let collaborator =
        ActingUser::new(ActorId::new("collab@example.com")?, ActorRole::Collaborator);

    let ticket = Ticket::new(ProjectKey::new("PRJ-002")?, "Billing export", reporter, &clock)?;

    let forward = service.evaluate(
        &ticket,
        TicketStatus::ToDo,
        Some(&collaborator),
        InvocationContext::Board,
    );
    ensure!(forward.denial_kind() == Some(DenialKind::PermissionDenied));

    // Advance the ticket with an admin override from the board, then step it
    // back as the collaborator.
    let admin = ActingUser::new(ActorId::new("admin@example.com")?, ActorRole::Admin);
    let advance = service.evaluate(
        &ticket,
        TicketStatus::ToDo,
        Some(&admin),
        InvocationContext::Board,
    );
    ensure!(advance.allowed && advance.admin_override);
    let ticket = service.commit(ticket, &advance, &admin.id, Some("triage sprint"), None)?;

    let back = service.evaluate(
        &ticket,
        TicketStatus::Backlog,
        Some(&collaborator),
        InvocationContext::Board,
    );
    ensure!(back.allowed);
    ensure!(back.reason_required);
    let ticket = service.commit(ticket, &back, &collaborator.id, Some("scope unclear"), None)?;
    ensure!(ticket.status() == TicketStatus::Backlog);
    Ok(())
}
