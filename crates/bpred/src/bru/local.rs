//! Local (per-branch history) Predictor.
//!
//! Each branch address selects a history register in the Local History Table
//! (LHT). That branch's own recent outcomes then index a private pattern table
//! of two-bit counters (a PAg organization).

use super::counter::CounterState;
use super::history::HistoryRegister;
use super::pattern::PatternTable;
use crate::common::{BRANCH_SHIFT, ConfigError};

/// Table slots read by a local lookup, kept for training at resolve time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSlot {
    /// Index of the branch's history register in the LHT.
    pub history_index: usize,
    /// Index of the counter in the local pattern table.
    pub counter_index: usize,
}

/// Local history predictor.
#[derive(Debug, Clone)]
pub struct LocalPredictor {
    /// Local History Table storing history patterns per branch.
    histories: Vec<HistoryRegister>,
    /// Mask for indexing the LHT.
    lht_mask: usize,
    /// Local pattern table indexed by local history patterns.
    pht: PatternTable,
}

impl LocalPredictor {
    /// Creates a local predictor.
    ///
    /// # Arguments
    ///
    /// * `history_bits` - Width of each per-branch history; the pattern table holds
    ///   `1 << history_bits` counters.
    /// * `lht_size` - Number of per-branch history registers (power of two).
    /// * `bias` - Initial state of every pattern table counter.
    ///
    /// # Errors
    ///
    /// Fails on a zero or oversized history width or a non-power-of-two LHT size.
    pub fn new(history_bits: u32, lht_size: usize, bias: CounterState) -> Result<Self, ConfigError> {
        let register = HistoryRegister::new("local history", history_bits)?;
        if !lht_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                table: "local history table",
                size: lht_size,
            });
        }
        let pht = PatternTable::new("local pattern table", 1 << history_bits, bias)?;
        Ok(Self {
            histories: vec![register; lht_size],
            lht_mask: lht_size - 1,
            pht,
        })
    }

    /// LHT slot for a branch address.
    #[inline]
    pub const fn history_index(&self, pc: u64) -> usize {
        ((pc >> BRANCH_SHIFT) as usize) & self.lht_mask
    }

    /// Predicts the branch at `pc` from its own history.
    ///
    /// Returns the predicted direction and the slots to train later.
    pub fn lookup(&self, pc: u64) -> (bool, LocalSlot) {
        let history_index = self.history_index(pc);
        let counter_index = self.pht.index(self.histories[history_index].value());
        let slot = LocalSlot {
            history_index,
            counter_index,
        };
        (self.pht.read(counter_index).direction(), slot)
    }

    /// Shifts `taken` into the history of the branch at `pc` only.
    ///
    /// The pattern table is not touched.
    pub fn update_history(&mut self, pc: u64, taken: bool) {
        let idx = self.history_index(pc);
        self.histories[idx].shift_in(taken);
    }

    /// Trains the counter captured by an earlier lookup.
    pub fn train(&mut self, slot: LocalSlot, taken: bool) {
        self.pht.train(slot.counter_index, taken);
    }

    /// Current history of the branch at `pc`.
    pub fn history(&self, pc: u64) -> u32 {
        self.histories[self.history_index(pc)].value()
    }

    /// The local pattern table.
    pub const fn table(&self) -> &PatternTable {
        &self.pht
    }

    /// Number of LHT entries.
    pub fn lht_size(&self) -> usize {
        self.histories.len()
    }

    /// Clears all histories and restores every counter to its bias.
    pub fn reset(&mut self) {
        self.histories.iter_mut().for_each(HistoryRegister::clear);
        self.pht.reset();
    }
}
