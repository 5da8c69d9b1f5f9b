//! Branch resolution unit (BRU) implementations.
//!
//! This module contains the building blocks (saturating counters, history
//! registers, pattern tables), the local and global sub-predictors with their
//! choice selector, the branch target buffer (BTB), the tournament and
//! perceptron predictors, the return address stack (RAS), and the
//! `BranchUnit` front-end that ties a predictor to a RAS.

pub(crate) use self::branch_predictor::Issuer;
pub use self::branch_predictor::{BranchPredictor, Prediction, TokenStamp};
pub use self::unit::BranchUnit;

/// Branch predictor trait, prediction result, and token stamps.
pub mod branch_predictor;

/// Branch Target Buffer for storing predicted branch targets.
pub mod btb;

/// Two-state-per-direction choice between the local and global predictors.
pub mod choice;

/// Two-bit saturating counters.
pub mod counter;

/// Global history predictor (GHR-indexed pattern table).
pub mod global;

/// Shift-register and bipolar histories.
pub mod history;

/// Local history predictor (per-branch histories).
pub mod local;

/// Power-of-two tables of saturating counters.
pub mod pattern;

/// Perceptron-based neural branch predictor.
pub mod perceptron;

/// Return Address Stack for predicting return addresses.
pub mod ras;

/// BTB victim selection policies.
pub mod replacement;

/// Tournament branch predictor (combines local and global predictors).
pub mod tournament;

/// Front-end pairing a direction predictor with the RAS.
pub mod unit;

use self::{
    perceptron::{PerceptronPredictor, PerceptronToken},
    tournament::{TournamentPredictor, TournamentToken},
};
use crate::common::{ConfigError, ResolveError};
use crate::config::{Config, PredictorKind};
use crate::stats::PredictorStats;

/// Enum wrapper for static dispatch of Branch Predictors.
/// This avoids vtable lookups on the predict/resolve path.
#[derive(Debug)]
pub enum BranchPredictorWrapper {
    /// Local/global hybrid with BTB.
    Tournament(TournamentPredictor),
    /// Hashed perceptron.
    Perceptron(PerceptronPredictor),
}

/// Token issued by a [`BranchPredictorWrapper`].
#[derive(Debug)]
pub enum PredictionToken {
    /// Issued by a tournament predictor.
    Tournament(TournamentToken),
    /// Issued by a perceptron predictor.
    Perceptron(PerceptronToken),
}

impl PredictionToken {
    /// Name of the predictor kind that issued this token.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Tournament(_) => "tournament",
            Self::Perceptron(_) => "perceptron",
        }
    }

    /// Address of the predicted branch.
    pub const fn pc(&self) -> u64 {
        match self {
            Self::Tournament(t) => t.pc(),
            Self::Perceptron(t) => t.pc(),
        }
    }
}

impl BranchPredictorWrapper {
    /// Creates a new branch predictor wrapper based on configuration.
    ///
    /// # Errors
    ///
    /// Propagates the selected predictor's [`ConfigError`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(match config.predictor {
            PredictorKind::Tournament => {
                Self::Tournament(TournamentPredictor::new(&config.tournament)?)
            }
            PredictorKind::Perceptron => {
                Self::Perceptron(PerceptronPredictor::new(&config.perceptron)?)
            }
        })
    }

    /// Name of the wrapped predictor kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Tournament(_) => "tournament",
            Self::Perceptron(_) => "perceptron",
        }
    }

    /// The tournament predictor, if that is what is wrapped.
    pub const fn as_tournament(&self) -> Option<&TournamentPredictor> {
        match self {
            Self::Tournament(bp) => Some(bp),
            Self::Perceptron(_) => None,
        }
    }

    /// The perceptron predictor, if that is what is wrapped.
    pub const fn as_perceptron(&self) -> Option<&PerceptronPredictor> {
        match self {
            Self::Perceptron(bp) => Some(bp),
            Self::Tournament(_) => None,
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    type Token = PredictionToken;

    #[inline]
    fn predict(&self, pc: u64) -> Prediction<PredictionToken> {
        match self {
            Self::Tournament(bp) => bp.predict(pc).map_token(PredictionToken::Tournament),
            Self::Perceptron(bp) => bp.predict(pc).map_token(PredictionToken::Perceptron),
        }
    }

    /// Forwards to the wrapped predictor.
    ///
    /// A token of the other kind is rejected with [`ResolveError::KindMismatch`].
    #[inline]
    fn resolve(&mut self, token: PredictionToken, taken: bool, target: u64) -> Result<(), ResolveError> {
        match (self, token) {
            (Self::Tournament(bp), PredictionToken::Tournament(t)) => bp.resolve(t, taken, target),
            (Self::Perceptron(bp), PredictionToken::Perceptron(t)) => bp.resolve(t, taken, target),
            (bp, token) => Err(ResolveError::KindMismatch {
                expected: bp.kind(),
                got: token.kind(),
            }),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Tournament(bp) => bp.reset(),
            Self::Perceptron(bp) => bp.reset(),
        }
    }

    fn stats(&self) -> &PredictorStats {
        match self {
            Self::Tournament(bp) => bp.stats(),
            Self::Perceptron(bp) => bp.stats(),
        }
    }
}
