//! Unit tests for the workflow module.
//!
//! Tests are organised by concern: statuses and their order, the transition
//! guard matrix, checklist gating, the ticket aggregate's mutators and audit
//! trail, board ordering keys, and the validate-then-commit service.

mod board_tests;
