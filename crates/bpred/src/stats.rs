//! Prediction statistics collection.
//!
//! This module tracks how well a predictor is doing. It provides:
//! 1. **Resolution counters:** Direction hits and misses, target outcomes, selector
//!    decisions, and training events, all counted at resolve time.
//! 2. **Occupancy snapshots:** How many counters of each pattern table sit in each
//!    of the four two-bit states.
//!
//! Formatting these into a report is left to the simulator.

use serde::Serialize;

use crate::bru::counter::CounterState;

/// Counters accumulated as branches resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PredictorStats {
    /// Branches resolved.
    pub branches: u64,
    /// Branches whose direction was predicted correctly.
    pub direction_hits: u64,
    /// Branches whose direction was mispredicted.
    pub direction_misses: u64,
    /// Branches predicted taken for which the BTB had no target.
    pub unknown_targets: u64,
    /// Taken branches predicted taken with a target that turned out wrong.
    pub target_misses: u64,
    /// Predictions where the selector trusted the local predictor.
    pub local_selected: u64,
    /// Predictions where the selector trusted the global predictor.
    pub global_selected: u64,
    /// Resolutions where local and global disagreed on correctness and the selector trained.
    pub choice_updates: u64,
    /// Resolutions that adjusted perceptron weights.
    pub weight_updates: u64,
}

impl PredictorStats {
    /// Records one resolved direction.
    #[inline]
    pub const fn record_direction(&mut self, predicted: bool, actual: bool) {
        self.branches += 1;
        if predicted == actual {
            self.direction_hits += 1;
        } else {
            self.direction_misses += 1;
        }
    }

    /// Fraction of branches whose direction was predicted correctly.
    ///
    /// Returns 0.0 when nothing has been resolved yet.
    pub fn accuracy(&self) -> f64 {
        if self.branches == 0 {
            0.0
        } else {
            self.direction_hits as f64 / self.branches as f64
        }
    }
}

/// Number of counters in each two-bit state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounterDistribution {
    /// Counters at 0.
    pub strongly_not_taken: u64,
    /// Counters at 1.
    pub weakly_not_taken: u64,
    /// Counters at 2.
    pub weakly_taken: u64,
    /// Counters at 3.
    pub strongly_taken: u64,
}

impl CounterDistribution {
    /// Adds one counter in `state`.
    #[inline]
    pub const fn record(&mut self, state: CounterState) {
        match state {
            CounterState::StronglyNotTaken => self.strongly_not_taken += 1,
            CounterState::WeaklyNotTaken => self.weakly_not_taken += 1,
            CounterState::WeaklyTaken => self.weakly_taken += 1,
            CounterState::StronglyTaken => self.strongly_taken += 1,
        }
    }

    /// Counters recorded in `state`.
    pub const fn count(&self, state: CounterState) -> u64 {
        match state {
            CounterState::StronglyNotTaken => self.strongly_not_taken,
            CounterState::WeaklyNotTaken => self.weakly_not_taken,
            CounterState::WeaklyTaken => self.weakly_taken,
            CounterState::StronglyTaken => self.strongly_taken,
        }
    }

    /// Total counters recorded.
    pub const fn total(&self) -> u64 {
        self.strongly_not_taken + self.weakly_not_taken + self.weakly_taken + self.strongly_taken
    }
}

/// Occupancy snapshot of the three tournament tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TournamentDistribution {
    /// Local pattern table.
    pub local: CounterDistribution,
    /// Global pattern table.
    pub global: CounterDistribution,
    /// Choice table; the not-taken states prefer Local, the taken states Global.
    pub choice: CounterDistribution,
    /// Global history register at snapshot time.
    pub ghr: u32,
}
