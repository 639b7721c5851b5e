//! Service layer tying validation and commit together.

use crate::workflow::domain::{
    ActingUser, ActorId, ChecklistConfig, InvocationContext, OrderKey, Ticket, TicketDomainError,
    TicketStatus,
};
use crate::workflow::validation::{TransitionDecision, evaluate_transition};
use mockable::Clock;
use std::sync::Arc;

/// Validate-then-commit front door for status transitions.
///
/// UI surfaces call [`evaluate`](Self::evaluate) before offering a move and
/// [`commit`](Self::commit) once the user has confirmed (and supplied a
/// reason where the decision demands one).
#[derive(Clone)]
pub struct TransitionService<C>
where
    C: Clock + Send + Sync,
{
    config: Arc<ChecklistConfig>,
    clock: Arc<C>,
}

impl<C> TransitionService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a new transition service.
    #[must_use]
    pub const fn new(config: Arc<ChecklistConfig>, clock: Arc<C>) -> Self {
        Self { config, clock }
    }

    /// Returns the checklist configuration in use.
    #[must_use]
    pub fn checklist_config(&self) -> &ChecklistConfig {
        &self.config
    }

    /// Evaluates a proposed transition without mutating anything.
    #[must_use]
    pub fn evaluate(
        &self,
        ticket: &Ticket,
        to: TicketStatus,
        actor: Option<&ActingUser>,
        context: InvocationContext,
    ) -> TransitionDecision {
        evaluate_transition(ticket, to, actor, context, &self.config)
    }

    /// Commits an allowed decision, returning the mutated ticket.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::TransitionNotPermitted`] when the
    /// decision denies the move, and propagates the aggregate's own checks
    /// (outdated decision, missing reason).
    pub fn commit(
        &self,
        ticket: Ticket,
        decision: &TransitionDecision,
        actor: &ActorId,
        reason: Option<&str>,
        order: Option<OrderKey>,
    ) -> Result<Ticket, TicketDomainError> {
        let Some(approved) = decision.approval() else {
            return Err(TicketDomainError::TransitionNotPermitted {
                from: decision.from,
                to: decision.to,
            });
        };
        ticket.commit_transition(&approved, actor, reason, order, &*self.clock)
    }
}
