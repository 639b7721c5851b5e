//! Transition validation for the ticket status state machine.
//!
//! The validator is pure: it maps a proposed move and the acting user onto a
//! structured [`TransitionDecision`] and never mutates the ticket. Denials
//! are data, not errors; the caller surfaces them and may retry with a
//! different proposal.

mod decision;
pub mod rules;

pub use decision::{
    DenialKind, MoveKind, ReasonPrompt, TransitionDecision, TransitionDenial,
};
pub use rules::{classify_move, evaluate_transition};
