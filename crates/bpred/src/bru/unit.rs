//! Branch unit front-end.
//!
//! Owns the configured direction predictor and the return address stack. The
//! fetch stage calls `predict` for conditional branches and the RAS hooks for
//! calls and returns; the commit stage calls `resolve`.

use tracing::debug;

use super::ras::Ras;
use super::{BranchPredictor, BranchPredictorWrapper, Prediction, PredictionToken};
use crate::common::{ConfigError, ResolveError};
use crate::config::Config;
use crate::stats::PredictorStats;

/// Direction predictor plus return address stack.
#[derive(Debug)]
pub struct BranchUnit {
    predictor: BranchPredictorWrapper,
    ras: Ras,
}

impl BranchUnit {
    /// Builds the predictor selected by `config.predictor` and a RAS of
    /// `config.ras_size` entries.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found in the selected predictor's
    /// geometry or the RAS size.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let predictor = BranchPredictorWrapper::new(config)?;
        let ras = Ras::new(config.ras_size)?;
        debug!(predictor = predictor.kind(), ras = config.ras_size, "branch unit configured");
        Ok(Self { predictor, ras })
    }

    /// The wrapped direction predictor.
    pub const fn predictor(&self) -> &BranchPredictorWrapper {
        &self.predictor
    }

    /// The return address stack.
    pub const fn ras(&self) -> &Ras {
        &self.ras
    }

    /// Records a call by pushing its return address.
    #[inline]
    pub fn on_call(&mut self, return_address: u64) {
        self.ras.push(return_address);
    }

    /// Predicted target of a return, without popping.
    #[inline]
    pub fn predict_return(&self) -> Option<u64> {
        self.ras.top()
    }

    /// Records a return by popping the stack.
    #[inline]
    pub fn on_return(&mut self) -> Option<u64> {
        self.ras.pop()
    }
}

impl BranchPredictor for BranchUnit {
    type Token = PredictionToken;

    #[inline]
    fn predict(&self, pc: u64) -> Prediction<PredictionToken> {
        self.predictor.predict(pc)
    }

    #[inline]
    fn resolve(&mut self, token: PredictionToken, taken: bool, target: u64) -> Result<(), ResolveError> {
        self.predictor.resolve(token, taken, target)
    }

    /// Resets the predictor and empties the RAS.
    fn reset(&mut self) {
        self.predictor.reset();
        self.ras.reset();
    }

    fn stats(&self) -> &PredictorStats {
        self.predictor.stats()
    }
}
