//! Unit tests for fractional board ordering keys.

use super::fixtures::moment;
use crate::workflow::board::order_key;
use crate::workflow::domain::OrderKey;
use eyre::ensure;
use rstest::rstest;

#[rstest]
#[case(Some(1000.0), Some(2000.0), 1500.0)]
#[case(Some(1000.0), Some(1001.0), 1000.5)]
fn drop_between_neighbours_takes_the_midpoint(
    #[case] before: Option<f64>,
    #[case] after: Option<f64>,
    #[case] expected: f64,
) -> eyre::Result<()> {
    let key = order_key(
        before.map(OrderKey::new),
        after.map(OrderKey::new),
        moment(0),
    );
    ensure!(key == OrderKey::new(expected));
    Ok(())
}

#[rstest]
fn drop_at_the_tail_leaves_a_gap_after_the_last_key() -> eyre::Result<()> {
    let key = order_key(Some(OrderKey::new(3000.0)), None, moment(0));
    ensure!(key == OrderKey::new(4000.0));
    Ok(())
}

#[rstest]
fn drop_at_the_head_halves_the_first_key() -> eyre::Result<()> {
    let key = order_key(None, Some(OrderKey::new(3000.0)), moment(0));
    ensure!(key == OrderKey::new(1500.0));
    Ok(())
}

#[rstest]
fn drop_into_an_empty_column_derives_the_key_from_the_timestamp() -> eyre::Result<()> {
    let now = moment(500);
    let key = order_key(None, None, now);
    ensure!(key == OrderKey::from_datetime(now));
    Ok(())
}

#[rstest]
fn midpoint_preserves_the_neighbours_relative_order() -> eyre::Result<()> {
    let before = OrderKey::new(10.0);
    let after = OrderKey::new(20.0);

    let key = order_key(Some(before), Some(after), moment(0));

    ensure!(before < key);
    ensure!(key < after);
    Ok(())
}
