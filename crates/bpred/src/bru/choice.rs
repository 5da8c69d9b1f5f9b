//! Choice Selector (meta-predictor).
//!
//! A table of two-bit counters indexed by the global history. The counter does
//! not predict a direction; it picks which sub-predictor to trust:
//! - 0 or 1 -> Local
//! - 2 or 3 -> Global
//!
//! The selector only learns from branches on which the two sub-predictors
//! disagree.

use super::counter::{CounterState, SaturatingCounter};
use super::pattern::PatternTable;
use crate::common::ConfigError;

/// Sub-predictor chosen by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    /// Per-branch history predictor.
    Local,
    /// Shared history predictor.
    Global,
}

/// Choice counter slot read by a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceSlot {
    /// Index of the counter in the choice table.
    pub counter_index: usize,
}

/// Tournament choice selector.
#[derive(Debug, Clone)]
pub struct ChoiceSelector {
    table: PatternTable,
}

impl ChoiceSelector {
    /// Creates a selector with `size` counters.
    ///
    /// # Errors
    ///
    /// Fails unless `size` is a non-zero power of two.
    pub fn new(size: usize, bias: CounterState) -> Result<Self, ConfigError> {
        Ok(Self {
            table: PatternTable::new("choice table", size, bias)?,
        })
    }

    /// Picks a winner for the given global history.
    pub fn lookup(&self, ghr: u32) -> (Winner, ChoiceSlot) {
        let counter_index = self.table.index(ghr);
        let winner = if self.table.read(counter_index).direction() {
            Winner::Global
        } else {
            Winner::Local
        };
        (winner, ChoiceSlot { counter_index })
    }

    /// Trains the selector captured by an earlier lookup.
    ///
    /// No-op when both sub-predictors were right or both were wrong. Otherwise
    /// moves toward Global when Global was correct, toward Local when Local was.
    pub fn train(&mut self, slot: ChoiceSlot, local_correct: bool, global_correct: bool) {
        if local_correct != global_correct {
            self.table.train(slot.counter_index, global_correct);
        }
    }

    /// Counter value for the given global history.
    pub fn read(&self, ghr: u32) -> SaturatingCounter {
        self.table.read(self.table.index(ghr))
    }

    /// The underlying counter table.
    pub const fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Restores every counter to its bias.
    pub fn reset(&mut self) {
        self.table.reset();
    }
}
