//! Configuration Tests.
//!
//! Verifies documented defaults and that every field is optional when the
//! configuration is deserialized.

use bpsim_core::bru::counter::CounterState;
use bpsim_core::config::{
    BtbReplacement, Config, PerceptronConfig, PredictorKind, TournamentConfig,
};
use pretty_assertions::assert_eq;

#[test]
fn tournament_defaults() {
    assert_eq!(
        TournamentConfig::default(),
        TournamentConfig {
            local_history_bits: 10,
            local_table_size: 4096,
            global_history_bits: 12,
            choice_table_size: 4096,
            btb_sets: 512,
            btb_assoc: 2,
            btb_replacement: BtbReplacement::FixedSlot,
            local_bias: CounterState::WeaklyTaken,
            global_bias: CounterState::WeaklyTaken,
            choice_bias: CounterState::WeaklyNotTaken,
        }
    );
}

#[test]
fn perceptron_defaults() {
    assert_eq!(
        PerceptronConfig::default(),
        PerceptronConfig {
            num_perceptrons: 1024,
            weight_bits: 8,
            history_length: 32,
        }
    );
}

#[test]
fn empty_json_equals_default() {
    let config: Config = serde_json::from_str("{}").unwrap();
    let default = Config::default();
    assert_eq!(config.predictor, default.predictor);
    assert_eq!(config.tournament, default.tournament);
    assert_eq!(config.perceptron, default.perceptron);
    assert_eq!(config.ras_size, 8);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let json = r#"{
        "predictor": "Perceptron",
        "ras_size": 16,
        "tournament": { "btb_assoc": 4, "btb_replacement": "LRU", "choice_bias": "StronglyTaken" },
        "perceptron": { "history_length": 64 }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.predictor, PredictorKind::Perceptron);
    assert_eq!(config.ras_size, 16);
    assert_eq!(
        config.tournament,
        TournamentConfig {
            btb_assoc: 4,
            btb_replacement: BtbReplacement::Lru,
            choice_bias: CounterState::StronglyTaken,
            ..TournamentConfig::default()
        }
    );
    assert_eq!(
        config.perceptron,
        PerceptronConfig {
            history_length: 64,
            ..PerceptronConfig::default()
        }
    );
}

#[test]
fn replacement_accepts_variant_name() {
    let r: BtbReplacement = serde_json::from_str(r#""Lru""#).unwrap();
    assert_eq!(r, BtbReplacement::Lru);
    let r: BtbReplacement = serde_json::from_str(r#""FixedSlot""#).unwrap();
    assert_eq!(r, BtbReplacement::FixedSlot);
}

#[test]
fn unknown_predictor_is_an_error() {
    let result: Result<Config, _> = serde_json::from_str(r#"{ "predictor": "Tage" }"#);
    assert!(result.is_err());
}
