//! Perceptron Branch Predictor.
//!
//! Uses a table of single-layer perceptrons to predict branch direction. The
//! branch address hashes to one row of weights; the prediction is the sign of the
//! dot product of those weights with the bipolar global history (plus a bias
//! weight whose input is always +1). Weights are trained only on a misprediction
//! or when the output magnitude falls inside the training threshold.
//!
//! This predictor produces a direction only; it has no BTB.

use tracing::{debug, trace, warn};

use super::history::BipolarHistory;
use super::{BranchPredictor, Issuer, Prediction, TokenStamp};
use crate::common::constants::{
    PERCEPTRON_MAX_ENTRIES, PERCEPTRON_MAX_HISTORY, PERCEPTRON_MAX_WEIGHT_BITS,
    PERCEPTRON_MIN_WEIGHT_BITS,
};
use crate::common::{ConfigError, ResolveError};
use crate::config::PerceptronConfig;
use crate::stats::PredictorStats;

/// Coefficient used to calculate the training threshold.
const THETA_COEFF: f64 = 1.93;
/// Bias used to calculate the training threshold.
const THETA_BIAS: i32 = 14;
/// Histories longer than this get extra threshold margin.
const LONG_HISTORY: usize = 32;

/// Training threshold for a history of `history_length` outcomes.
///
/// `floor(1.93 * h) + 14`, plus `h / 4` when `h > 32`.
pub fn training_threshold(history_length: usize) -> i32 {
    let mut theta = (THETA_COEFF * history_length as f64) as i32 + THETA_BIAS;
    if history_length > LONG_HISTORY {
        theta += (history_length / 4) as i32;
    }
    theta
}

/// Resolution handle for one perceptron prediction.
#[derive(Debug)]
pub struct PerceptronToken {
    stamp: TokenStamp,
    pc: u64,
    index: usize,
    output: i32,
}

impl PerceptronToken {
    /// Address of the predicted branch.
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Perceptron row consulted.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Dot product computed at predict time.
    pub const fn output(&self) -> i32 {
        self.output
    }

    /// Direction that was reported to the caller.
    pub const fn predicted_taken(&self) -> bool {
        self.output >= 0
    }

    /// Issuer and epoch of this token.
    pub const fn stamp(&self) -> TokenStamp {
        self.stamp
    }
}

/// Perceptron Predictor structure.
#[derive(Debug)]
pub struct PerceptronPredictor {
    /// Table of weights (flattened, `row_size` per perceptron, bias first).
    table: Vec<i16>,
    /// Size of a single row in the table (history length + bias).
    row_size: usize,
    /// Mask for indexing the table.
    table_mask: usize,
    /// Global bipolar history.
    history: BipolarHistory,
    /// Largest weight magnitude.
    max_weight: i32,
    /// Training threshold (theta).
    threshold: i32,
    /// Configured bits per weight.
    weight_bits: u32,
    /// Token issuer for this instance.
    issuer: Issuer,
    /// Resolution statistics.
    stats: PredictorStats,
}

impl PerceptronPredictor {
    /// Creates a new Perceptron Predictor based on configuration.
    ///
    /// Oversized `num_perceptrons` and `history_length` are clamped to
    /// [`PERCEPTRON_MAX_ENTRIES`] and [`PERCEPTRON_MAX_HISTORY`] with a warning.
    ///
    /// # Errors
    ///
    /// Fails when either count is zero, the (clamped) table size is not a power
    /// of two, or `weight_bits` is outside `2..=16`.
    pub fn new(config: &PerceptronConfig) -> Result<Self, ConfigError> {
        if config.num_perceptrons == 0 {
            return Err(ConfigError::Zero {
                field: "perceptron count",
            });
        }
        if config.history_length == 0 {
            return Err(ConfigError::Zero {
                field: "perceptron history length",
            });
        }
        if !(PERCEPTRON_MIN_WEIGHT_BITS..=PERCEPTRON_MAX_WEIGHT_BITS).contains(&config.weight_bits) {
            return Err(ConfigError::WeightBits {
                bits: config.weight_bits,
                min: PERCEPTRON_MIN_WEIGHT_BITS,
                max: PERCEPTRON_MAX_WEIGHT_BITS,
            });
        }

        let mut entries = config.num_perceptrons;
        if entries > PERCEPTRON_MAX_ENTRIES {
            warn!(
                requested = entries,
                max = PERCEPTRON_MAX_ENTRIES,
                "perceptron count exceeds table capacity, clamping"
            );
            entries = PERCEPTRON_MAX_ENTRIES;
        }
        let mut hist_len = config.history_length;
        if hist_len > PERCEPTRON_MAX_HISTORY {
            warn!(
                requested = hist_len,
                max = PERCEPTRON_MAX_HISTORY,
                "perceptron history length exceeds capacity, clamping"
            );
            hist_len = PERCEPTRON_MAX_HISTORY;
        }
        if !entries.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                table: "perceptron table",
                size: entries,
            });
        }

        let row_size = hist_len + 1;
        let threshold = training_threshold(hist_len);
        let max_weight = (1i32 << (config.weight_bits - 1)) - 1;

        debug!(
            entries,
            weight_bits = config.weight_bits,
            history = hist_len,
            threshold,
            "perceptron predictor configured"
        );

        Ok(Self {
            table: vec![0; entries * row_size],
            row_size,
            table_mask: entries - 1,
            history: BipolarHistory::new(hist_len),
            max_weight,
            threshold,
            weight_bits: config.weight_bits,
            issuer: Issuer::new(),
            stats: PredictorStats::default(),
        })
    }

    /// Hashes a branch address to a perceptron row.
    #[inline]
    pub const fn index(&self, pc: u64) -> usize {
        (((pc >> 2) ^ (pc >> 13) ^ (pc >> 17)) as usize) & self.table_mask
    }

    /// Weights of one perceptron, bias first.
    pub fn weights(&self, index: usize) -> &[i16] {
        let base = index * self.row_size;
        &self.table[base..base + self.row_size]
    }

    /// Computes the perceptron output (dot product) for a given row.
    fn output(&self, index: usize) -> i32 {
        self.weights(index)
            .iter()
            .zip(self.history.inputs())
            .map(|(&w, &x)| i32::from(w) * i32::from(x))
            .sum()
    }

    /// Number of perceptrons after clamping.
    pub fn num_perceptrons(&self) -> usize {
        self.table_mask + 1
    }

    /// History length after clamping.
    pub fn history_length(&self) -> usize {
        self.history.len()
    }

    /// The bipolar global history.
    pub const fn history(&self) -> &BipolarHistory {
        &self.history
    }

    /// Training threshold.
    pub const fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Largest weight magnitude, `2^(weight_bits - 1) - 1`.
    pub const fn max_weight(&self) -> i32 {
        self.max_weight
    }

    /// Configured bits per weight.
    pub const fn weight_bits(&self) -> u32 {
        self.weight_bits
    }
}

impl BranchPredictor for PerceptronPredictor {
    type Token = PerceptronToken;

    /// Predicts taken if the perceptron output is non-negative.
    fn predict(&self, pc: u64) -> Prediction<PerceptronToken> {
        let index = self.index(pc);
        let output = self.output(index);
        Prediction {
            taken: output >= 0,
            target: None,
            token: PerceptronToken {
                stamp: self.issuer.stamp(),
                pc,
                index,
                output,
            },
        }
    }

    /// Updates the weights based on the actual outcome, then shifts the history.
    ///
    /// Trains if the prediction was wrong or the output magnitude was at or below
    /// the threshold. Each weight moves by `t * x_i`, clamped to `±max_weight`.
    fn resolve(&mut self, token: PerceptronToken, taken: bool, _target: u64) -> Result<(), ResolveError> {
        self.issuer.check(token.stamp)?;

        let t: i32 = if taken { 1 } else { -1 };
        let y = token.output;
        let train = t * y <= 0 || y.abs() <= self.threshold;

        if train {
            let max = self.max_weight;
            let base = token.index * self.row_size;
            let row = &mut self.table[base..base + self.row_size];
            for (w, &x) in row.iter_mut().zip(self.history.inputs()) {
                *w = (i32::from(*w) + t * i32::from(x)).clamp(-max, max) as i16;
            }
            self.stats.weight_updates += 1;
        }

        self.history.push(taken);
        self.stats.record_direction(token.predicted_taken(), taken);

        trace!(pc = token.pc, output = y, taken, train, "perceptron resolve");
        Ok(())
    }

    fn reset(&mut self) {
        self.table.fill(0);
        self.history.reset();
        self.issuer.advance();
        self.stats = PredictorStats::default();
        debug!("perceptron predictor reset");
    }

    fn stats(&self) -> &PredictorStats {
        &self.stats
    }
}
