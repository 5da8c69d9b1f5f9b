//! Predictor-wide constants.

/// Number of low address bits skipped by every index and tag computation.
///
/// Branch addresses are word aligned, so the bottom two bits carry no information.
pub const BRANCH_SHIFT: u32 = 2;

/// Widest history register accepted by the counter-table predictors.
pub const MAX_HISTORY_BITS: u32 = 30;

/// Largest perceptron table; bigger requests are clamped with a warning.
pub const PERCEPTRON_MAX_ENTRIES: usize = 8192;

/// Longest perceptron history; longer requests are clamped with a warning.
pub const PERCEPTRON_MAX_HISTORY: usize = 256;

/// Widest perceptron weight in bits (weights are stored as `i16`).
pub const PERCEPTRON_MAX_WEIGHT_BITS: u32 = 16;

/// Narrowest perceptron weight in bits; one bit leaves no magnitude.
pub const PERCEPTRON_MIN_WEIGHT_BITS: u32 = 2;
