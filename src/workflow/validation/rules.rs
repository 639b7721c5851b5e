//! The transition guard matrix.
//!
//! Guards are evaluated in priority order: missing actor, terminal source,
//! then one exhaustive match over `(role, move kind)` so the full matrix is
//! visible in one place and every cell is testable.

use super::{DenialKind, MoveKind, ReasonPrompt, TransitionDecision, TransitionDenial};
use crate::workflow::domain::{
    ActingUser, ActorRole, ChecklistConfig, InvocationContext, Ticket, TicketStatus,
};

/// Classifies a proposed move relative to the linear status order.
///
/// Returns `None` when the request is not a transition: the source equals
/// the target, or a status has no position in the linear order (only
/// `NotApplicable`, which as a *target* classifies before position
/// arithmetic and as a *source* is rejected as terminal by the caller).
#[must_use]
pub fn classify_move(from: TicketStatus, to: TicketStatus) -> Option<MoveKind> {
    if to == TicketStatus::NotApplicable {
        if from == to {
            return None;
        }
        return Some(MoveKind::ToNotApplicable);
    }
    let from_position = from.position()?;
    let to_position = to.position()?;

    match (
        to_position > from_position,
        to_position.abs_diff(from_position),
    ) {
        (_, 0) => None,
        (true, 1) => Some(MoveKind::StepForward),
        (false, 1) => Some(MoveKind::StepBackward),
        (true, _) => Some(MoveKind::SkipForward),
        (false, _) => Some(MoveKind::SkipBackward),
    }
}

/// Evaluates one proposed transition against the guard matrix.
///
/// Pure: consults the ticket's checklist and the acting user's role, and
/// returns a structured decision without mutating anything. The caller
/// commits through the ticket aggregate or surfaces the denial.
#[must_use]
pub fn evaluate_transition(
    ticket: &Ticket,
    to: TicketStatus,
    actor: Option<&ActingUser>,
    context: InvocationContext,
    config: &ChecklistConfig,
) -> TransitionDecision {
    let from = ticket.status();

    let Some(acting) = actor else {
        return TransitionDecision::deny(from, to, context, TransitionDenial::new(DenialKind::NoActor));
    };

    if from.is_terminal() {
        return TransitionDecision::deny(
            from,
            to,
            context,
            TransitionDenial::new(DenialKind::FromTerminalState),
        );
    }

    let Some(kind) = classify_move(from, to) else {
        return TransitionDecision::deny(
            from,
            to,
            context,
            TransitionDenial::new(DenialKind::InvalidState),
        );
    };

    let role = acting.role;
    match (role, kind) {
        // Declaring a ticket not applicable is reserved for admins and
        // leaders, and always needs a recorded justification.
        (ActorRole::Admin | ActorRole::Leader, MoveKind::ToNotApplicable) => {
            TransitionDecision::allow(from, to, context).with_reason(ReasonPrompt::NotApplicable)
        }
        (_, MoveKind::ToNotApplicable) => deny_role(from, to, context, role),

        // Collaborators log progress but never advance status themselves.
        (ActorRole::Collaborator, MoveKind::StepForward | MoveKind::SkipForward) => {
            deny_role(from, to, context, role)
        }
        (ActorRole::Collaborator, MoveKind::SkipBackward) => TransitionDecision::deny(
            from,
            to,
            context,
            TransitionDenial::new(DenialKind::SkipNotAllowed),
        ),
        (ActorRole::Collaborator, MoveKind::StepBackward) => {
            TransitionDecision::allow(from, to, context).with_reason(ReasonPrompt::BackwardMove)
        }

        (ActorRole::Leader, MoveKind::SkipForward | MoveKind::SkipBackward) => {
            TransitionDecision::deny(
                from,
                to,
                context,
                TransitionDenial::new(DenialKind::SkipNotAllowed),
            )
        }
        (ActorRole::Leader, MoveKind::StepBackward) => {
            TransitionDecision::allow(from, to, context).with_reason(ReasonPrompt::BackwardMove)
        }
        (ActorRole::Leader, MoveKind::StepForward) => {
            step_forward_through_gate(ticket, to, context, config, false)
        }

        (ActorRole::Admin, MoveKind::StepBackward | MoveKind::SkipBackward) => {
            TransitionDecision::allow(from, to, context).with_reason(ReasonPrompt::BackwardMove)
        }
        (ActorRole::Admin, MoveKind::SkipForward) => TransitionDecision::allow(from, to, context)
            .with_reason(ReasonPrompt::SkipMove)
            .with_admin_override(),
        (ActorRole::Admin, MoveKind::StepForward) => {
            step_forward_through_gate(ticket, to, context, config, true)
        }

        (ActorRole::Client | ActorRole::Viewer, _) => deny_role(from, to, context, role),
    }
}

fn deny_role(
    from: TicketStatus,
    to: TicketStatus,
    context: InvocationContext,
    role: ActorRole,
) -> TransitionDecision {
    TransitionDecision::deny(
        from,
        to,
        context,
        TransitionDenial::new(DenialKind::PermissionDenied).with_role(role),
    )
}

/// Applies the checklist gate to a one-step forward move.
///
/// Admins may override an incomplete gate, but only from the board view.
fn step_forward_through_gate(
    ticket: &Ticket,
    to: TicketStatus,
    context: InvocationContext,
    config: &ChecklistConfig,
    override_available: bool,
) -> TransitionDecision {
    let from = ticket.status();
    let missing = config.missing_items(from, ticket.checklist());
    if missing.is_empty() {
        return TransitionDecision::allow(from, to, context);
    }

    if override_available && context == InvocationContext::Board {
        return TransitionDecision::allow(from, to, context)
            .with_incomplete_checklist()
            .with_admin_override()
            .with_reason(ReasonPrompt::ChecklistOverride);
    }

    let labels = missing.into_iter().map(|item| item.label.clone()).collect();
    TransitionDecision::deny(
        from,
        to,
        context,
        TransitionDenial::new(DenialKind::ChecklistIncomplete).with_missing_items(labels),
    )
    .with_incomplete_checklist()
}
