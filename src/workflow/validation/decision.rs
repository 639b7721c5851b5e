//! Structured decision data returned by the transition validator.

use crate::workflow::domain::{
    ActorRole, ApprovedTransition, InvocationContext, TicketStatus,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a proposed move relative to the linear status order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// One position forward.
    StepForward,
    /// One position backward.
    StepBackward,
    /// More than one position forward.
    SkipForward,
    /// More than one position backward.
    SkipBackward,
    /// Into the absorbing `NotApplicable` state.
    ToNotApplicable,
}

/// Why a proposed transition was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// The acting role may not make this move.
    PermissionDenied,
    /// The ticket is already in a terminal status.
    FromTerminalState,
    /// The role may not skip over intermediate statuses.
    SkipNotAllowed,
    /// The source status's checklist gate failed.
    ChecklistIncomplete,
    /// The request does not describe a transition.
    InvalidState,
    /// No acting user was supplied.
    NoActor,
}

impl fmt::Display for DenialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::PermissionDenied => "permission denied",
            Self::FromTerminalState => "ticket is in a terminal status",
            Self::SkipNotAllowed => "skipping statuses is not allowed",
            Self::ChecklistIncomplete => "checklist is incomplete",
            Self::InvalidState => "request is not a valid transition",
            Self::NoActor => "no acting user",
        };
        f.write_str(text)
    }
}

/// Denial payload: the kind plus whatever detail the caller needs to build
/// a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDenial {
    /// Why the move was denied.
    pub kind: DenialKind,
    /// The acting role, when the denial is role-based.
    pub role: Option<ActorRole>,
    /// Labels of unchecked required items, for checklist denials, in
    /// configuration order.
    pub missing_items: Vec<String>,
}

impl TransitionDenial {
    /// Creates a denial with no extra detail.
    #[must_use]
    pub const fn new(kind: DenialKind) -> Self {
        Self {
            kind,
            role: None,
            missing_items: Vec::new(),
        }
    }

    /// Attaches the acting role.
    #[must_use]
    pub const fn with_role(mut self, role: ActorRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Attaches the unchecked required item labels.
    #[must_use]
    pub fn with_missing_items(mut self, missing_items: Vec<String>) -> Self {
        self.missing_items = missing_items;
        self
    }
}

/// Which reason the caller should prompt for before committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonPrompt {
    /// Justify stepping the ticket backward.
    BackwardMove,
    /// Justify jumping over intermediate statuses.
    SkipMove,
    /// Justify declaring the ticket not applicable.
    NotApplicable,
    /// Justify overriding an incomplete checklist.
    ChecklistOverride,
}

/// Outcome of evaluating one proposed transition.
///
/// The validator only advises; the caller either surfaces the denial or
/// commits the mutation through the ticket aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionDecision {
    /// Status the move was evaluated from.
    pub from: TicketStatus,
    /// Requested target status.
    pub to: TicketStatus,
    /// Surface the move was requested from.
    pub context: InvocationContext,
    /// Whether the move may be committed.
    pub allowed: bool,
    /// Whether committing requires a recorded reason.
    pub reason_required: bool,
    /// Whether the move rides on an admin override of the checklist gate.
    pub admin_override: bool,
    /// Checklist completeness at the moment of decision.
    pub checklist_complete: bool,
    /// Denial payload when `allowed` is false.
    pub denial: Option<TransitionDenial>,
    /// Reason prompt to show when `reason_required` is true.
    pub reason_prompt: Option<ReasonPrompt>,
}

impl TransitionDecision {
    /// Creates an allowing decision with no strings attached.
    #[must_use]
    pub const fn allow(from: TicketStatus, to: TicketStatus, context: InvocationContext) -> Self {
        Self {
            from,
            to,
            context,
            allowed: true,
            reason_required: false,
            admin_override: false,
            checklist_complete: true,
            denial: None,
            reason_prompt: None,
        }
    }

    /// Creates a denying decision.
    #[must_use]
    pub const fn deny(
        from: TicketStatus,
        to: TicketStatus,
        context: InvocationContext,
        denial: TransitionDenial,
    ) -> Self {
        Self {
            from,
            to,
            context,
            allowed: false,
            reason_required: false,
            admin_override: false,
            checklist_complete: true,
            denial: Some(denial),
            reason_prompt: None,
        }
    }

    /// Demands a recorded reason before committing.
    #[must_use]
    pub const fn with_reason(mut self, prompt: ReasonPrompt) -> Self {
        self.reason_required = true;
        self.reason_prompt = Some(prompt);
        self
    }

    /// Marks the decision as an admin override of the checklist gate.
    #[must_use]
    pub const fn with_admin_override(mut self) -> Self {
        self.admin_override = true;
        self
    }

    /// Records that the checklist gate was consulted and found incomplete.
    #[must_use]
    pub const fn with_incomplete_checklist(mut self) -> Self {
        self.checklist_complete = false;
        self
    }

    /// Returns the kind of denial, when denied.
    #[must_use]
    pub fn denial_kind(&self) -> Option<DenialKind> {
        self.denial.as_ref().map(|denial| denial.kind)
    }

    /// Converts an allowing decision into a committable approval.
    ///
    /// Returns `None` when the decision denies the move, so a denial can
    /// never reach the commit path.
    #[must_use]
    pub fn approval(&self) -> Option<ApprovedTransition> {
        self.allowed.then(|| {
            ApprovedTransition::new(
                self.from,
                self.to,
                self.reason_required,
                self.admin_override,
                self.checklist_complete,
                self.context,
            )
        })
    }
}
