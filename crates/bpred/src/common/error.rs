//! Configuration and resolution errors.
//!
//! This module defines the two failure classes of the predictors:
//! 1. **Configuration errors:** Invalid geometry detected at construction. These are fatal
//!    for the simulation; the `Display` text is the message to abort with.
//! 2. **Resolution errors:** A token presented to a predictor that did not issue it, or that
//!    was issued before the last reset. These indicate a caller bug.

use thiserror::Error;

/// Invalid predictor geometry, reported by every constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A table size is zero or not a power of two.
    #[error("{table}: size {size} must be a non-zero power of two")]
    NotPowerOfTwo {
        /// Name of the offending table.
        table: &'static str,
        /// Requested size.
        size: usize,
    },

    /// A history register width is zero or wider than the supported maximum.
    #[error("{register}: history width {bits} must be between 1 and {max} bits")]
    HistoryWidth {
        /// Name of the offending register.
        register: &'static str,
        /// Requested width in bits.
        bits: u32,
        /// Largest accepted width.
        max: u32,
    },

    /// A count that must be positive was zero.
    #[error("{field} must be positive")]
    Zero {
        /// Name of the offending parameter.
        field: &'static str,
    },

    /// The perceptron weight width is outside the supported range.
    #[error("perceptron: weight width {bits} must be between {min} and {max} bits")]
    WeightBits {
        /// Requested width in bits.
        bits: u32,
        /// Smallest accepted width.
        min: u32,
        /// Largest accepted width.
        max: u32,
    },
}

/// A resolution token that the receiving predictor cannot accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The token was issued by a different predictor instance.
    #[error("token issued by predictor #{issued_by} presented to predictor #{owner}")]
    ForeignToken {
        /// Instance that issued the token.
        issued_by: u64,
        /// Instance the token was presented to.
        owner: u64,
    },

    /// The token was issued before the predictor was last reset.
    #[error("token from epoch {token_epoch} is stale (predictor is at epoch {current_epoch})")]
    StaleToken {
        /// Reset epoch recorded in the token.
        token_epoch: u64,
        /// Current reset epoch of the predictor.
        current_epoch: u64,
    },

    /// The token belongs to a different kind of predictor.
    #[error("{got} token cannot be resolved by a {expected} predictor")]
    KindMismatch {
        /// Predictor kind that received the token.
        expected: &'static str,
        /// Predictor kind that issued the token.
        got: &'static str,
    },
}
