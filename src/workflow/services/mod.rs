//! Orchestration services for the ticket workflow.

mod transition;

pub use transition::TransitionService;
