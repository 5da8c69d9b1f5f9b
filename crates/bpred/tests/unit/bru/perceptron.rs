//! Perceptron Predictor Tests.
//!
//! Checks the training threshold formula, the address hash, the train-on-
//! mispredict-or-low-confidence rule, weight clamping, and the capacity clamps
//! applied at construction.

use bpsim_core::bru::BranchPredictor;
use bpsim_core::bru::perceptron::{PerceptronPredictor, training_threshold};
use bpsim_core::common::{ConfigError, ResolveError};
use bpsim_core::config::PerceptronConfig;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{init_tracing, resolve_n, small_perceptron};

const PC: u64 = 0x1000;

fn single_history() -> PerceptronPredictor {
    init_tracing();
    PerceptronPredictor::new(&small_perceptron(64, 1)).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Threshold
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(1, 15)]
#[case(8, 29)]
#[case(32, 75)]
#[case(33, 85)]
#[case(64, 153)]
#[case(256, 572)]
fn theta_matches_formula(#[case] history: usize, #[case] theta: i32) {
    assert_eq!(training_threshold(history), theta);
}

#[test]
fn predictor_uses_threshold_for_its_history() {
    let bp = PerceptronPredictor::new(&small_perceptron(16, 33)).unwrap();
    assert_eq!(bp.threshold(), 85);
    assert_eq!(bp.max_weight(), 127);
}

// ══════════════════════════════════════════════════════════
// 2. Construction
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(PerceptronConfig { num_perceptrons: 0, ..small_perceptron(64, 8) }, ConfigError::Zero { field: "perceptron count" })]
#[case(PerceptronConfig { history_length: 0, ..small_perceptron(64, 8) }, ConfigError::Zero { field: "perceptron history length" })]
#[case(PerceptronConfig { num_perceptrons: 1000, ..small_perceptron(64, 8) }, ConfigError::NotPowerOfTwo { table: "perceptron table", size: 1000 })]
#[case(PerceptronConfig { weight_bits: 1, ..small_perceptron(64, 8) }, ConfigError::WeightBits { bits: 1, min: 2, max: 16 })]
#[case(PerceptronConfig { weight_bits: 17, ..small_perceptron(64, 8) }, ConfigError::WeightBits { bits: 17, min: 2, max: 16 })]
fn invalid_config_is_rejected(#[case] config: PerceptronConfig, #[case] expected: ConfigError) {
    assert_eq!(PerceptronPredictor::new(&config).unwrap_err(), expected);
}

#[test]
fn oversized_geometry_is_clamped() {
    init_tracing();
    let bp = PerceptronPredictor::new(&small_perceptron(16384, 1000)).unwrap();
    assert_eq!(bp.num_perceptrons(), 8192);
    assert_eq!(bp.history_length(), 256);
    assert_eq!(bp.threshold(), 572);
}

#[test]
fn clamped_count_is_checked_after_clamping() {
    let bp = PerceptronPredictor::new(&small_perceptron(10_000, 8)).unwrap();
    assert_eq!(bp.num_perceptrons(), 8192);
}

#[test]
fn default_config_builds() {
    let bp = PerceptronPredictor::new(&PerceptronConfig::default()).unwrap();
    assert_eq!(bp.num_perceptrons(), 1024);
    assert_eq!(bp.history_length(), 32);
    assert_eq!(bp.weight_bits(), 8);
    assert_eq!(bp.history().inputs().len(), 33);
}

// ══════════════════════════════════════════════════════════
// 3. Prediction
// ══════════════════════════════════════════════════════════

#[test]
fn index_hash_folds_upper_bits() {
    let bp = PerceptronPredictor::new(&small_perceptron(1024, 8)).unwrap();
    assert_eq!(bp.index(0x1000), 0);
    assert_eq!(bp.index(0x1004), 1);
    assert_eq!(bp.index(0x2000), 1, "bit 13 folds into bit 0");
    assert_eq!(bp.index(0x20000), 0x3ff & (0x8000 ^ 0x10 ^ 0x1));
}

#[test]
fn zero_weights_predict_taken() {
    let bp = single_history();
    assert_eq!(bp.threshold(), 15);
    let p = bp.predict(PC);
    assert!(p.taken);
    assert_eq!(p.token.output(), 0);
    assert_eq!(p.target, None, "perceptron has no BTB");
}

// ══════════════════════════════════════════════════════════
// 4. Training
// ══════════════════════════════════════════════════════════

#[test]
fn mispredict_trains_and_shifts_history() {
    let mut bp = single_history();
    let p = bp.predict(PC);
    let idx = p.token.index();
    bp.resolve(p.token, false, 0).unwrap();
    assert_eq!(bp.weights(idx), &[-1, -1]);
    assert_eq!(bp.history().inputs(), &[1, -1]);
    assert_eq!(bp.stats().weight_updates, 1);
    assert_eq!(bp.stats().direction_misses, 1);
}

#[test]
fn training_stops_once_confident() {
    let mut bp = single_history();
    resolve_n(&mut bp, PC, true, 0x2000, 20);
    let idx = bp.index(PC);
    assert_eq!(bp.weights(idx), &[8, 8], "sum 16 exceeds theta 15");
    assert_eq!(bp.stats().weight_updates, 8);
    assert_eq!(bp.stats().direction_hits, 20);
}

#[test]
fn weights_clamp_at_max() {
    let mut bp = PerceptronPredictor::new(&PerceptronConfig {
        weight_bits: 2,
        ..small_perceptron(64, 1)
    })
    .unwrap();
    assert_eq!(bp.max_weight(), 1);
    resolve_n(&mut bp, PC, true, 0, 10);
    assert_eq!(bp.weights(bp.index(PC)), &[1, 1]);
    resolve_n(&mut bp, PC, false, 0, 10);
    assert_eq!(bp.weights(bp.index(PC)), &[-1, 1], "history now all not-taken");
}

#[test]
fn other_rows_untouched() {
    let mut bp = single_history();
    resolve_n(&mut bp, PC, true, 0, 3);
    assert_eq!(bp.weights(bp.index(PC + 4)), &[0, 0]);
}

// ══════════════════════════════════════════════════════════
// 5. Tokens and reset
// ══════════════════════════════════════════════════════════

#[test]
fn stale_token_is_rejected() {
    let mut bp = single_history();
    let p = bp.predict(PC);
    bp.reset();
    assert!(matches!(
        bp.resolve(p.token, true, 0),
        Err(ResolveError::StaleToken { .. })
    ));
    assert_eq!(bp.weights(bp.index(PC)), &[0, 0]);
}

#[test]
fn foreign_token_is_rejected() {
    let a = single_history();
    let mut b = single_history();
    let p = a.predict(PC);
    assert!(matches!(
        b.resolve(p.token, true, 0),
        Err(ResolveError::ForeignToken { .. })
    ));
}

#[test]
fn reset_zeroes_weights_and_history() {
    let mut bp = single_history();
    resolve_n(&mut bp, PC, false, 0, 4);
    bp.reset();
    assert_eq!(bp.weights(bp.index(PC)), &[0, 0]);
    assert_eq!(bp.history().inputs(), &[1, 1]);
    assert_eq!(bp.stats().branches, 0);
}
