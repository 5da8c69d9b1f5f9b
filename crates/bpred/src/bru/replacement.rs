//! BTB Replacement Policies.
//!
//! Selects the way to overwrite when a set has no matching and no invalid entry.
//!
//! # Policies
//!
//! - `FixedSlotPolicy`: Always evicts way 0.
//! - `LruPolicy`: Evicts the least recently written way.

use std::fmt;

/// Trait for BTB replacement policies.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Records that `way` of `set` was written.
    fn touch(&mut self, set: usize, way: usize);

    /// Selects the way to evict from a full set.
    fn victim(&mut self, set: usize) -> usize;

    /// Forgets all recency state.
    fn reset(&mut self);
}

/// Fixed-slot replacement: the first way of the set is always the victim.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSlotPolicy;

impl ReplacementPolicy for FixedSlotPolicy {
    fn touch(&mut self, _set: usize, _way: usize) {}

    fn victim(&mut self, _set: usize) -> usize {
        0
    }

    fn reset(&mut self) {}
}

/// Least Recently Used replacement.
///
/// Keeps a recency stack per set; index 0 is MRU, the last index is LRU.
/// Recency advances on writes only, since BTB lookups are read-only.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    usage: Vec<Vec<usize>>,
    ways: usize,
}

impl LruPolicy {
    /// Creates an LRU policy for `sets` sets of `ways` ways.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: vec![(0..ways).collect(); sets],
            ways,
        }
    }
}

impl ReplacementPolicy for LruPolicy {
    fn touch(&mut self, set: usize, way: usize) {
        let stack = &mut self.usage[set];
        stack.retain(|&w| w != way);
        stack.insert(0, way);
    }

    fn victim(&mut self, set: usize) -> usize {
        self.usage[set].last().copied().unwrap_or(0)
    }

    fn reset(&mut self) {
        for stack in &mut self.usage {
            stack.clear();
            stack.extend(0..self.ways);
        }
    }
}
