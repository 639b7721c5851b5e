//! Ticket lifecycle workflow for Pushtrack.
//!
//! Implements the role-guarded status state machine: an ordered sequence of
//! lifecycle statuses with one absorbing `NotApplicable` branch, per-status
//! checklist gating, structured transition decisions, and the fractional
//! board-ordering key used after an approved move. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Pure transition rules in [`validation`]
//! - Orchestration services in [`services`]
//! - Board ordering arithmetic in [`board`]

pub mod board;
pub mod domain;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
