//! Pattern History Table (PHT).
//!
//! A power-of-two array of two-bit counters indexed by a history value. The
//! local, global, and choice predictors each own one.

use super::counter::{CounterState, SaturatingCounter};
use crate::common::ConfigError;
use crate::stats::CounterDistribution;

/// Pattern History Table of two-bit saturating counters.
#[derive(Debug, Clone)]
pub struct PatternTable {
    /// Counter storage.
    counters: Vec<SaturatingCounter>,
    /// Mask for indexing the table.
    mask: usize,
    /// State every counter returns to on reset.
    initial: CounterState,
}

impl PatternTable {
    /// Creates a table of `size` counters, all in the `initial` state.
    ///
    /// # Arguments
    ///
    /// * `name` - Table name used in the error message.
    /// * `size` - Number of counters. Must be a non-zero power of two.
    /// * `initial` - Bias every counter starts (and resets) in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPowerOfTwo`] when `size` is invalid.
    pub fn new(name: &'static str, size: usize, initial: CounterState) -> Result<Self, ConfigError> {
        if !size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo { table: name, size });
        }
        Ok(Self {
            counters: vec![SaturatingCounter::new(initial); size],
            mask: size - 1,
            initial,
        })
    }

    /// Masks a history value down to a slot index.
    #[inline]
    pub const fn index(&self, history: u32) -> usize {
        (history as usize) & self.mask
    }

    /// Reads the counter at `idx` (masked to the table size).
    #[inline]
    pub fn read(&self, idx: usize) -> SaturatingCounter {
        self.counters[idx & self.mask]
    }

    /// Trains the counter at `idx` toward `taken`.
    #[inline]
    pub fn train(&mut self, idx: usize, taken: bool) {
        self.counters[idx & self.mask].train(taken);
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Always false; a table holds at least one counter.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// State every counter is initialized to.
    pub const fn initial_state(&self) -> CounterState {
        self.initial
    }

    /// Returns every counter to the initial state without reallocating.
    pub fn reset(&mut self) {
        self.counters.fill(SaturatingCounter::new(self.initial));
    }

    /// Counts how many counters sit in each state.
    pub fn distribution(&self) -> CounterDistribution {
        let mut dist = CounterDistribution::default();
        for c in &self.counters {
            dist.record(c.state());
        }
        dist
    }
}
