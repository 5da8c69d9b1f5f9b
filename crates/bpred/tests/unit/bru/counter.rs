//! Saturating Counter Tests.
//!
//! Verifies state naming, direction threshold, and saturation at both ends.

use bpsim_core::bru::counter::{CounterState, SaturatingCounter};
use proptest::prelude::*;

// ══════════════════════════════════════════════════════════
// 1. States and direction
// ══════════════════════════════════════════════════════════

#[test]
fn default_is_weakly_taken() {
    let c = SaturatingCounter::default();
    assert_eq!(c.state(), CounterState::WeaklyTaken);
    assert_eq!(c.value(), 2);
    assert!(c.direction());
}

#[test]
fn direction_threshold_is_two() {
    let directions: Vec<bool> = CounterState::ALL
        .iter()
        .map(|&s| SaturatingCounter::new(s).direction())
        .collect();
    assert_eq!(directions, vec![false, false, true, true]);
}

#[test]
fn state_round_trips_through_value() {
    for state in CounterState::ALL {
        let c = SaturatingCounter::from(state);
        assert_eq!(c.value(), state as u8);
        assert_eq!(c.state(), state);
    }
}

// ══════════════════════════════════════════════════════════
// 2. Saturation
// ══════════════════════════════════════════════════════════

#[test]
fn four_taken_from_zero_reaches_and_stays_at_three() {
    let mut c = SaturatingCounter::new(CounterState::StronglyNotTaken);
    for _ in 0..4 {
        c.train(true);
    }
    assert_eq!(c.value(), SaturatingCounter::MAX);
    c.increment();
    assert_eq!(c.state(), CounterState::StronglyTaken, "must not wrap past 3");
}

#[test]
fn four_not_taken_from_three_reaches_and_stays_at_zero() {
    let mut c = SaturatingCounter::new(CounterState::StronglyTaken);
    for _ in 0..4 {
        c.train(false);
    }
    assert_eq!(c.value(), 0);
    c.decrement();
    assert_eq!(c.state(), CounterState::StronglyNotTaken, "must not wrap below 0");
}

#[test]
fn single_step_flips_weak_states() {
    let mut c = SaturatingCounter::new(CounterState::WeaklyNotTaken);
    c.train(true);
    assert!(c.direction());
    c.train(false);
    assert!(!c.direction());
}

proptest! {
    #[test]
    fn counter_stays_in_range(start in 0usize..4, outcomes in prop::collection::vec(any::<bool>(), 0..64)) {
        let mut c = SaturatingCounter::new(CounterState::ALL[start]);
        for taken in outcomes {
            c.train(taken);
            prop_assert!(c.value() <= SaturatingCounter::MAX);
            prop_assert_eq!(c.state() as u8, c.value());
        }
    }
}
