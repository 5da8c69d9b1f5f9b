//! Global History Predictor.
//!
//! A single Global History Register (GHR) of the most recent outcomes across
//! all branches indexes a shared table of `2^W` two-bit counters.

use super::counter::CounterState;
use super::history::HistoryRegister;
use super::pattern::PatternTable;
use crate::common::ConfigError;

/// Counter slot read by a global lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalSlot {
    /// Index of the counter in the global pattern table.
    pub counter_index: usize,
}

/// Global history predictor.
#[derive(Debug, Clone)]
pub struct GlobalPredictor {
    /// Global History Register.
    ghr: HistoryRegister,
    /// Global pattern table (2-bit counters).
    pht: PatternTable,
}

impl GlobalPredictor {
    /// Creates a global predictor with a `history_bits`-wide GHR.
    ///
    /// # Errors
    ///
    /// Fails unless `1 <= history_bits <= 30`.
    pub fn new(history_bits: u32, bias: CounterState) -> Result<Self, ConfigError> {
        Ok(Self {
            ghr: HistoryRegister::new("global history", history_bits)?,
            pht: PatternTable::new("global pattern table", 1 << history_bits, bias)?,
        })
    }

    /// Predicts from the current GHR.
    pub fn lookup(&self) -> (bool, GlobalSlot) {
        let counter_index = self.pht.index(self.ghr.value());
        (
            self.pht.read(counter_index).direction(),
            GlobalSlot { counter_index },
        )
    }

    /// Current GHR value.
    #[inline]
    pub const fn ghr(&self) -> u32 {
        self.ghr.value()
    }

    /// Shifts `taken` into the GHR.
    pub const fn update_history(&mut self, taken: bool) {
        self.ghr.shift_in(taken);
    }

    /// Trains the counter captured by an earlier lookup.
    pub fn train(&mut self, slot: GlobalSlot, taken: bool) {
        self.pht.train(slot.counter_index, taken);
    }

    /// The global pattern table.
    pub const fn table(&self) -> &PatternTable {
        &self.pht
    }

    /// Clears the GHR and restores every counter to its bias.
    pub fn reset(&mut self) {
        self.ghr.clear();
        self.pht.reset();
    }
}
