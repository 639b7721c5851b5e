//! Fractional ordering keys for Kanban board columns.
//!
//! A moved ticket gets a key between its new neighbours so the rest of the
//! column never needs rewriting. Only invoked after the transition validator
//! has approved a cross-column move, or unconditionally for same-column
//! reordering.

use crate::workflow::domain::OrderKey;
use chrono::{DateTime, Utc};

/// Gap left after the last ticket in a column.
const TAIL_GAP: f64 = 1000.0;

/// Computes the ordering key for a ticket dropped between two neighbours.
///
/// With both neighbours present the key is their midpoint; at the tail it is
/// the preceding key plus a fixed gap; at the head it is half the following
/// key; in an empty column it is derived from the current timestamp.
#[expect(
    clippy::float_arithmetic,
    reason = "Fractional ordering keys are the point of this module; precision loss only ever costs a rebalance"
)]
#[must_use]
pub fn order_key(
    preceding: Option<OrderKey>,
    following: Option<OrderKey>,
    now: DateTime<Utc>,
) -> OrderKey {
    match (preceding, following) {
        (Some(before), Some(after)) => OrderKey::new((before.value() + after.value()) / 2.0),
        (Some(before), None) => OrderKey::new(before.value() + TAIL_GAP),
        (None, Some(after)) => OrderKey::new(after.value() / 2.0),
        (None, None) => OrderKey::from_datetime(now),
    }
}
