//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that all branch prediction
//! implementations adhere to, the `Prediction` they return, and the stamp that
//! ties every resolution token to the predictor instance and reset epoch that
//! issued it.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::common::ResolveError;
use crate::stats::PredictorStats;

/// Source of unique predictor instance ids.
static NEXT_PREDICTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Outcome of a `predict` call.
#[derive(Debug)]
pub struct Prediction<T> {
    /// Predicted direction.
    pub taken: bool,
    /// Predicted target. `None` on a taken prediction means the target is unknown
    /// (BTB miss); it never means "not taken".
    pub target: Option<u64>,
    /// Handle to pass back to `resolve` exactly once.
    pub token: T,
}

impl<T> Prediction<T> {
    /// Rewraps the token, keeping the direction and target.
    #[inline]
    pub fn map_token<U>(self, f: impl FnOnce(T) -> U) -> Prediction<U> {
        Prediction {
            taken: self.taken,
            target: self.target,
            token: f(self.token),
        }
    }
}

/// Trait for branch prediction algorithms.
///
/// Defines the predict/resolve contract: every `predict` yields a token that
/// captures the table slots consulted, and `resolve` trains those slots once
/// the real outcome is known.
pub trait BranchPredictor {
    /// Opaque resolution handle produced by `predict`.
    type Token;

    /// Predicts the direction (and, where supported, target) of the branch at `pc`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction
    fn predict(&self, pc: u64) -> Prediction<Self::Token>;

    /// Trains the predictor with the resolved outcome of an earlier prediction.
    ///
    /// # Arguments
    ///
    /// * `token` - Handle returned by the matching `predict`; consumed
    /// * `taken` - Whether the branch was actually taken
    /// * `target` - Resolved target address (ignored when not taken)
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] when the token was not issued by this
    /// predictor since its last reset. The predictor is left untouched.
    fn resolve(&mut self, token: Self::Token, taken: bool, target: u64) -> Result<(), ResolveError>;

    /// Reinitializes every table and history without reallocating.
    ///
    /// Outstanding tokens become stale.
    fn reset(&mut self);

    /// Statistics gathered since construction or the last reset.
    fn stats(&self) -> &PredictorStats;
}

/// Identity of the predictor instance and reset epoch that issued a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenStamp {
    owner: u64,
    epoch: u64,
}

impl TokenStamp {
    /// Predictor instance that issued the token.
    pub const fn owner(self) -> u64 {
        self.owner
    }

    /// Reset epoch the token was issued in.
    pub const fn epoch(self) -> u64 {
        self.epoch
    }
}

/// Issues and checks token stamps for one predictor instance.
#[derive(Debug)]
pub(crate) struct Issuer {
    owner: u64,
    epoch: u64,
}

impl Issuer {
    pub(crate) fn new() -> Self {
        Self {
            owner: NEXT_PREDICTOR_ID.fetch_add(1, Ordering::Relaxed),
            epoch: 0,
        }
    }

    pub(crate) const fn stamp(&self) -> TokenStamp {
        TokenStamp {
            owner: self.owner,
            epoch: self.epoch,
        }
    }

    /// Invalidates every stamp issued so far.
    pub(crate) const fn advance(&mut self) {
        self.epoch += 1;
    }

    pub(crate) const fn check(&self, stamp: TokenStamp) -> Result<(), ResolveError> {
        if stamp.owner != self.owner {
            return Err(ResolveError::ForeignToken {
                issued_by: stamp.owner,
                owner: self.owner,
            });
        }
        if stamp.epoch != self.epoch {
            return Err(ResolveError::StaleToken {
                token_epoch: stamp.epoch,
                current_epoch: self.epoch,
            });
        }
        Ok(())
    }
}
