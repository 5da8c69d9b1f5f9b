//! Branch Target Buffer (BTB).
//!
//! The BTB is a set-associative cache mapping branch addresses to the target
//! they last jumped to. It is written only by resolved taken branches and read
//! by the fetch side once the direction predictor says "taken".

use super::replacement::{FixedSlotPolicy, LruPolicy, ReplacementPolicy};
use crate::common::{BRANCH_SHIFT, ConfigError};
use crate::config::BtbReplacement;

/// An entry in the Branch Target Buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BtbEntry {
    /// Branch address with the alignment bits shifted out.
    pub tag: u64,
    /// The predicted target address.
    pub target: u64,
    /// Indicates if this entry contains valid data.
    pub valid: bool,
}

/// Branch Target Buffer structure.
#[derive(Debug)]
pub struct Btb {
    /// `sets * assoc` entries, one set after another.
    entries: Vec<BtbEntry>,
    /// Number of sets.
    sets: usize,
    /// Ways per set.
    assoc: usize,
    /// Victim selection for full sets.
    policy: Box<dyn ReplacementPolicy>,
}

impl Btb {
    /// Creates an empty BTB.
    ///
    /// # Arguments
    ///
    /// * `sets` - Number of sets. Must be a non-zero power of two.
    /// * `assoc` - Ways per set. Must be non-zero.
    /// * `replacement` - Victim policy for full sets.
    ///
    /// # Errors
    ///
    /// Fails on an invalid set count or zero associativity.
    pub fn new(sets: usize, assoc: usize, replacement: BtbReplacement) -> Result<Self, ConfigError> {
        if !sets.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                table: "btb sets",
                size: sets,
            });
        }
        if assoc == 0 {
            return Err(ConfigError::Zero {
                field: "btb associativity",
            });
        }
        let policy: Box<dyn ReplacementPolicy> = match replacement {
            BtbReplacement::FixedSlot => Box::new(FixedSlotPolicy),
            BtbReplacement::Lru => Box::new(LruPolicy::new(sets, assoc)),
        };
        Ok(Self {
            entries: vec![BtbEntry::default(); sets * assoc],
            sets,
            assoc,
            policy,
        })
    }

    /// Tag stored for a branch address.
    #[inline]
    pub const fn tag(pc: u64) -> u64 {
        pc >> BRANCH_SHIFT
    }

    /// Set a branch address maps to.
    #[inline]
    pub const fn set_index(&self, pc: u64) -> usize {
        (Self::tag(pc) as usize) & (self.sets - 1)
    }

    /// The ways of one set.
    fn set(&self, set: usize) -> &[BtbEntry] {
        &self.entries[set * self.assoc..(set + 1) * self.assoc]
    }

    /// Looks up a target address for the given program counter.
    ///
    /// # Returns
    ///
    /// The target of a valid entry with a matching tag, otherwise `None`.
    pub fn lookup(&self, pc: u64) -> Option<u64> {
        let tag = Self::tag(pc);
        self.set(self.set_index(pc))
            .iter()
            .find(|e| e.valid && e.tag == tag)
            .map(|e| e.target)
    }

    /// Records the target of a resolved taken branch.
    ///
    /// Updates a matching entry in place, else fills the first invalid way,
    /// else overwrites the way chosen by the replacement policy.
    pub fn update(&mut self, pc: u64, target: u64) {
        let tag = Self::tag(pc);
        let set = self.set_index(pc);
        let ways = self.set(set);
        let free = ways
            .iter()
            .position(|e| e.valid && e.tag == tag)
            .or_else(|| ways.iter().position(|e| !e.valid));

        let way = match free {
            Some(way) => way,
            None => self.policy.victim(set),
        };

        self.entries[set * self.assoc + way] = BtbEntry {
            tag,
            target,
            valid: true,
        };
        self.policy.touch(set, way);
    }

    /// Number of sets.
    pub const fn sets(&self) -> usize {
        self.sets
    }

    /// Ways per set.
    pub const fn assoc(&self) -> usize {
        self.assoc
    }

    /// Number of valid entries.
    pub fn occupancy(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }

    /// Invalidates every entry without reallocating.
    pub fn reset(&mut self) {
        self.entries.fill(BtbEntry::default());
        self.policy.reset();
    }
}
