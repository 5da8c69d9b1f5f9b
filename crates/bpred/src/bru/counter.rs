//! Two-bit Saturating Counter.
//!
//! The basic state element of every table-based predictor. The counter moves
//! one step toward "taken" or "not taken" per training event and sticks at
//! either end instead of wrapping.

use serde::Deserialize;

/// Named states of a two-bit counter.
///
/// Choice tables reuse the same encoding: the not-taken half selects the local
/// predictor and the taken half selects the global predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[repr(u8)]
pub enum CounterState {
    /// State 0.
    StronglyNotTaken = 0,
    /// State 1.
    WeaklyNotTaken = 1,
    /// State 2.
    #[default]
    WeaklyTaken = 2,
    /// State 3.
    StronglyTaken = 3,
}

impl CounterState {
    /// All states in ascending order.
    pub const ALL: [Self; 4] = [
        Self::StronglyNotTaken,
        Self::WeaklyNotTaken,
        Self::WeaklyTaken,
        Self::StronglyTaken,
    ];
}

/// A two-bit saturating counter holding a value in `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaturatingCounter(u8);

impl SaturatingCounter {
    /// Largest counter value.
    pub const MAX: u8 = 3;

    /// Threshold at or above which the counter predicts taken.
    pub const TAKEN_THRESHOLD: u8 = 2;

    /// Creates a counter in the given state.
    #[inline]
    pub const fn new(state: CounterState) -> Self {
        Self(state as u8)
    }

    /// Raw counter value in `0..=3`.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Named state of the counter.
    #[inline]
    pub const fn state(self) -> CounterState {
        match self.0 {
            0 => CounterState::StronglyNotTaken,
            1 => CounterState::WeaklyNotTaken,
            2 => CounterState::WeaklyTaken,
            _ => CounterState::StronglyTaken,
        }
    }

    /// Predicted direction: taken when the counter is in the upper half.
    #[inline]
    pub const fn direction(self) -> bool {
        self.0 >= Self::TAKEN_THRESHOLD
    }

    /// Moves one step toward taken, saturating at 3.
    #[inline]
    pub const fn increment(&mut self) {
        if self.0 < Self::MAX {
            self.0 += 1;
        }
    }

    /// Moves one step toward not taken, saturating at 0.
    #[inline]
    pub const fn decrement(&mut self) {
        if self.0 > 0 {
            self.0 -= 1;
        }
    }

    /// Increments on `taken`, decrements otherwise.
    #[inline]
    pub const fn train(&mut self, taken: bool) {
        if taken {
            self.increment();
        } else {
            self.decrement();
        }
    }
}

impl Default for SaturatingCounter {
    fn default() -> Self {
        Self::new(CounterState::default())
    }
}

impl From<CounterState> for SaturatingCounter {
    fn from(state: CounterState) -> Self {
        Self::new(state)
    }
}
