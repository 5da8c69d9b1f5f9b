//! Branch prediction library for cycle-level CPU simulators.
//!
//! This crate implements deterministic branch direction and target predictors with the following:
//! 1. **Tournament:** Local (per-branch history) and global (shared history) two-bit counter
//!    predictors arbitrated by a choice selector, backed by a set-associative BTB.
//! 2. **Perceptron:** A hashed table of linear classifiers trained online over a bipolar
//!    global history.
//! 3. **Front-end:** An enum-dispatched branch unit that also exposes the return address
//!    stack hook point.
//! 4. **Configuration:** Deserializable, defaulted parameter tree.
//! 5. **Statistics:** Resolution counters and pattern-table occupancy snapshots.
//!
//! Every prediction hands back an opaque token; the same token must be passed back to
//! `resolve` once the branch outcome is known. The tournament trains the table slots captured
//! in the token, never the ones the live history registers point at by then.

/// Common constants and error types.
pub mod common;
/// Predictor configuration (defaults, enums, per-predictor structures).
pub mod config;
/// Branch resolution unit: counters, histories, sub-predictors, BTB, and the predictors.
pub mod bru;
/// Prediction statistics and table occupancy snapshots.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize it.
pub use crate::config::Config;
/// Branch unit front-end; construct with `BranchUnit::new`.
pub use crate::bru::BranchUnit;
/// Predictor interface shared by every implementation.
pub use crate::bru::BranchPredictor;
