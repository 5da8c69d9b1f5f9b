//! Configuration system for the branch predictors.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the predictors. It provides:
//! 1. **Defaults:** Baseline geometry for the tournament, perceptron, and RAS.
//! 2. **Structures:** Per-predictor configuration, nested under a root `Config`.
//! 3. **Enums:** Predictor selection and BTB replacement policy.
//!
//! Configuration is deserialized by the host simulator (any serde format) or built
//! with `Config::default()`. Every field is optional in serialized form.

use serde::Deserialize;

use crate::bru::counter::CounterState;

/// Default configuration constants for the predictors.
mod defaults {
    use crate::bru::counter::CounterState;

    /// Default per-branch history width (10 bits, 1024-counter local table).
    pub const LOCAL_HISTORY_BITS: u32 = 10;

    /// Default Local History Table size (4096 branches).
    pub const LOCAL_TABLE_SIZE: usize = 4096;

    /// Default global history width (12 bits, 4096-counter global table).
    pub const GLOBAL_HISTORY_BITS: u32 = 12;

    /// Default choice table size (4096 counters, indexed by the GHR).
    pub const CHOICE_TABLE_SIZE: usize = 4096;

    /// Default BTB set count.
    pub const BTB_SETS: usize = 512;

    /// Default BTB associativity.
    pub const BTB_ASSOC: usize = 2;

    /// Local and global counters start weakly taken.
    pub const DIRECTION_BIAS: CounterState = CounterState::WeaklyTaken;

    /// Choice counters start weakly preferring the local predictor.
    pub const CHOICE_BIAS: CounterState = CounterState::WeaklyNotTaken;

    /// Default perceptron table size (1024 rows).
    pub const PERCEPTRON_ENTRIES: usize = 1024;

    /// Default perceptron weight width (8 bits, weights in -127..=127).
    pub const PERCEPTRON_WEIGHT_BITS: u32 = 8;

    /// Default perceptron global history length (32 outcomes).
    pub const PERCEPTRON_HISTORY: usize = 32;

    /// Default Return Address Stack size (8 entries).
    pub const RAS_SIZE: usize = 8;
}

/// Branch prediction algorithm types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PredictorKind {
    /// Local/global hybrid with a choice selector and BTB.
    #[default]
    Tournament,
    /// Hashed perceptron direction predictor (no BTB).
    Perceptron,
}

/// BTB victim selection when a set is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BtbReplacement {
    /// Always overwrite the first way of the set.
    #[default]
    FixedSlot,
    /// Overwrite the least recently written way.
    #[serde(alias = "LRU")]
    Lru,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use bpsim_core::config::{Config, PredictorKind};
///
/// let config = Config::default();
/// assert_eq!(config.predictor, PredictorKind::Tournament);
/// assert_eq!(config.tournament.global_history_bits, 12);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Which direction predictor the branch unit instantiates
    #[serde(default)]
    pub predictor: PredictorKind,

    /// Tournament predictor configuration
    #[serde(default)]
    pub tournament: TournamentConfig,

    /// Perceptron predictor configuration
    #[serde(default)]
    pub perceptron: PerceptronConfig,

    /// Return Address Stack size
    #[serde(default = "Config::default_ras_size")]
    pub ras_size: usize,
}

impl Config {
    /// Returns the default Return Address Stack size.
    fn default_ras_size() -> usize {
        defaults::RAS_SIZE
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predictor: PredictorKind::default(),
            tournament: TournamentConfig::default(),
            perceptron: PerceptronConfig::default(),
            ras_size: defaults::RAS_SIZE,
        }
    }
}

/// Tournament branch predictor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TournamentConfig {
    /// Per-branch history width in bits (1..=30)
    #[serde(default = "TournamentConfig::default_local_history_bits")]
    pub local_history_bits: u32,

    /// Local History Table entries (power of two)
    #[serde(default = "TournamentConfig::default_local_table_size")]
    pub local_table_size: usize,

    /// Global history width in bits (1..=30)
    #[serde(default = "TournamentConfig::default_global_history_bits")]
    pub global_history_bits: u32,

    /// Choice table entries (power of two)
    #[serde(default = "TournamentConfig::default_choice_table_size")]
    pub choice_table_size: usize,

    /// BTB sets (power of two)
    #[serde(default = "TournamentConfig::default_btb_sets")]
    pub btb_sets: usize,

    /// BTB ways per set
    #[serde(default = "TournamentConfig::default_btb_assoc")]
    pub btb_assoc: usize,

    /// BTB replacement policy
    #[serde(default)]
    pub btb_replacement: BtbReplacement,

    /// Initial state of the local pattern table
    #[serde(default = "TournamentConfig::default_direction_bias")]
    pub local_bias: CounterState,

    /// Initial state of the global pattern table
    #[serde(default = "TournamentConfig::default_direction_bias")]
    pub global_bias: CounterState,

    /// Initial state of the choice table
    #[serde(default = "TournamentConfig::default_choice_bias")]
    pub choice_bias: CounterState,
}

impl TournamentConfig {
    fn default_local_history_bits() -> u32 {
        defaults::LOCAL_HISTORY_BITS
    }

    fn default_local_table_size() -> usize {
        defaults::LOCAL_TABLE_SIZE
    }

    fn default_global_history_bits() -> u32 {
        defaults::GLOBAL_HISTORY_BITS
    }

    fn default_choice_table_size() -> usize {
        defaults::CHOICE_TABLE_SIZE
    }

    fn default_btb_sets() -> usize {
        defaults::BTB_SETS
    }

    fn default_btb_assoc() -> usize {
        defaults::BTB_ASSOC
    }

    fn default_direction_bias() -> CounterState {
        defaults::DIRECTION_BIAS
    }

    fn default_choice_bias() -> CounterState {
        defaults::CHOICE_BIAS
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            local_history_bits: defaults::LOCAL_HISTORY_BITS,
            local_table_size: defaults::LOCAL_TABLE_SIZE,
            global_history_bits: defaults::GLOBAL_HISTORY_BITS,
            choice_table_size: defaults::CHOICE_TABLE_SIZE,
            btb_sets: defaults::BTB_SETS,
            btb_assoc: defaults::BTB_ASSOC,
            btb_replacement: BtbReplacement::default(),
            local_bias: defaults::DIRECTION_BIAS,
            global_bias: defaults::DIRECTION_BIAS,
            choice_bias: defaults::CHOICE_BIAS,
        }
    }
}

/// Perceptron branch predictor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PerceptronConfig {
    /// Number of perceptrons (power of two; clamped to 8192)
    #[serde(default = "PerceptronConfig::default_num_perceptrons")]
    pub num_perceptrons: usize,

    /// Bits per weight (2..=16)
    #[serde(default = "PerceptronConfig::default_weight_bits")]
    pub weight_bits: u32,

    /// Global history length (clamped to 256)
    #[serde(default = "PerceptronConfig::default_history_length")]
    pub history_length: usize,
}

impl PerceptronConfig {
    fn default_num_perceptrons() -> usize {
        defaults::PERCEPTRON_ENTRIES
    }

    fn default_weight_bits() -> u32 {
        defaults::PERCEPTRON_WEIGHT_BITS
    }

    fn default_history_length() -> usize {
        defaults::PERCEPTRON_HISTORY
    }
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            num_perceptrons: defaults::PERCEPTRON_ENTRIES,
            weight_bits: defaults::PERCEPTRON_WEIGHT_BITS,
            history_length: defaults::PERCEPTRON_HISTORY,
        }
    }
}
