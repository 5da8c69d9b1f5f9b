//! Local and Global Sub-predictor Tests.
//!
//! The local predictor keeps one history per branch; the global predictor
//! keeps one history for all of them. Both index a pattern table with that
//! history and only learn through the slots returned by `lookup`.

use bpsim_core::bru::counter::CounterState;
use bpsim_core::bru::global::GlobalPredictor;
use bpsim_core::bru::local::LocalPredictor;
use bpsim_core::common::ConfigError;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

fn local() -> LocalPredictor {
    LocalPredictor::new(2, 4, CounterState::WeaklyTaken).unwrap()
}

fn global() -> GlobalPredictor {
    GlobalPredictor::new(2, CounterState::WeaklyTaken).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Local predictor
// ══════════════════════════════════════════════════════════

#[test]
fn local_geometry() {
    let lp = local();
    assert_eq!(lp.lht_size(), 4);
    assert_eq!(lp.table().len(), 4, "2-bit histories index 4 counters");
}

#[test]
fn local_rejects_bad_geometry() {
    assert!(matches!(
        LocalPredictor::new(0, 4, CounterState::WeaklyTaken),
        Err(ConfigError::HistoryWidth { bits: 0, .. })
    ));
    assert!(matches!(
        LocalPredictor::new(2, 6, CounterState::WeaklyTaken),
        Err(ConfigError::NotPowerOfTwo { size: 6, .. })
    ));
}

#[test]
fn local_history_index_skips_alignment_bits() {
    let lp = local();
    assert_eq!(lp.history_index(0x1000), 0);
    assert_eq!(lp.history_index(0x1004), 1);
    assert_eq!(lp.history_index(0x100C), 3);
    assert_eq!(lp.history_index(0x1010), 0, "wraps at LHT size");
}

#[test]
fn local_cold_lookup_follows_bias() {
    let (taken, slot) = local().lookup(0x1000);
    assert!(taken);
    assert_eq!(slot.history_index, 0);
    assert_eq!(slot.counter_index, 0);
}

#[test]
fn local_history_is_per_branch() {
    let mut lp = local();
    lp.update_history(0x1000, true);
    lp.update_history(0x1000, false);
    lp.update_history(0x1000, true);
    assert_eq!(lp.history(0x1000), 0b01, "masked to two bits");
    assert_eq!(lp.history(0x1004), 0, "other branch untouched");
    assert_eq!(lp.history(0x1010), 0b01, "aliasing branch shares the register");
}

#[test]
fn local_update_history_leaves_counters() {
    let mut lp = local();
    lp.update_history(0x1000, false);
    lp.update_history(0x1000, false);
    assert_eq!(
        lp.table().distribution().count(CounterState::WeaklyTaken),
        4
    );
}

#[test]
fn local_train_uses_captured_slot() {
    let mut lp = local();
    let (_, slot) = lp.lookup(0x1000);
    lp.update_history(0x1000, true);
    lp.train(slot, false);
    assert_eq!(lp.table().read(0).state(), CounterState::WeaklyNotTaken);
    assert_eq!(lp.table().read(1).state(), CounterState::WeaklyTaken);
}

#[test]
fn local_reset_clears_histories_and_counters() {
    let mut lp = local();
    let (_, slot) = lp.lookup(0x1000);
    lp.train(slot, false);
    lp.update_history(0x1000, true);
    lp.reset();
    assert_eq!(lp.history(0x1000), 0);
    assert_eq!(lp.table().read(0).state(), CounterState::WeaklyTaken);
}

// ══════════════════════════════════════════════════════════
// 2. Global predictor
// ══════════════════════════════════════════════════════════

#[test]
fn global_rejects_wide_history() {
    assert!(matches!(
        GlobalPredictor::new(31, CounterState::WeaklyTaken),
        Err(ConfigError::HistoryWidth { bits: 31, max: 30, .. })
    ));
}

#[test]
fn global_lookup_indexes_by_ghr() {
    let mut gp = global();
    gp.update_history(true);
    gp.update_history(false);
    let (_, slot) = gp.lookup();
    assert_eq!(gp.ghr(), 0b10);
    assert_eq!(slot.counter_index, 0b10);
}

#[test]
fn global_ghr_masks_to_width() {
    let mut gp = global();
    for _ in 0..5 {
        gp.update_history(true);
    }
    assert_eq!(gp.ghr(), 0b11);
}

#[test]
fn global_train_moves_counter() {
    let mut gp = global();
    let (_, slot) = gp.lookup();
    gp.train(slot, false);
    gp.train(slot, false);
    let (taken, _) = gp.lookup();
    assert!(!taken);
    assert_eq!(gp.table().read(0).state(), CounterState::StronglyNotTaken);
}

#[test]
fn global_reset_clears_ghr() {
    let mut gp = global();
    gp.update_history(true);
    gp.reset();
    assert_eq!(gp.ghr(), 0);
}
