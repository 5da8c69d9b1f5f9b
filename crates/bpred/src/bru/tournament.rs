//! Tournament Branch Predictor.
//!
//! A hybrid predictor that employs a meta-predictor (the choice selector) to
//! pick between a global predictor (shared GHR) and a local predictor (per-branch
//! histories). Taken predictions read their target from a set-associative BTB.
//!
//! Both sub-predictors are trained on every resolved branch using the slots
//! captured at predict time; histories advance only after training.

use tracing::{debug, trace};

use super::btb::Btb;
use super::choice::{ChoiceSelector, ChoiceSlot, Winner};
use super::global::{GlobalPredictor, GlobalSlot};
use super::local::{LocalPredictor, LocalSlot};
use super::{BranchPredictor, Issuer, Prediction, TokenStamp};
use crate::common::{ConfigError, ResolveError};
use crate::config::TournamentConfig;
use crate::stats::{PredictorStats, TournamentDistribution};

/// Resolution handle for one tournament prediction.
///
/// Records every table slot consulted, both sub-predictor opinions, and the
/// selector's decision, as they were at predict time.
#[derive(Debug)]
pub struct TournamentToken {
    stamp: TokenStamp,
    pc: u64,
    local: LocalSlot,
    global: GlobalSlot,
    choice: ChoiceSlot,
    local_taken: bool,
    global_taken: bool,
    winner: Winner,
    target: Option<u64>,
}

impl TournamentToken {
    /// Address of the predicted branch.
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Sub-predictor the selector trusted.
    pub const fn winner(&self) -> Winner {
        self.winner
    }

    /// Direction the local predictor proposed.
    pub const fn local_taken(&self) -> bool {
        self.local_taken
    }

    /// Direction the global predictor proposed.
    pub const fn global_taken(&self) -> bool {
        self.global_taken
    }

    /// Direction that was reported to the caller.
    pub const fn predicted_taken(&self) -> bool {
        match self.winner {
            Winner::Local => self.local_taken,
            Winner::Global => self.global_taken,
        }
    }

    /// Choice table slot consulted (the GHR at predict time, masked).
    pub const fn choice_index(&self) -> usize {
        self.choice.counter_index
    }

    /// Issuer and epoch of this token.
    pub const fn stamp(&self) -> TokenStamp {
        self.stamp
    }
}

/// Tournament Predictor structure.
#[derive(Debug)]
pub struct TournamentPredictor {
    /// Per-branch history predictor.
    local: LocalPredictor,
    /// Global history predictor; its GHR also indexes the selector.
    global: GlobalPredictor,
    /// Local/Global arbiter.
    choice: ChoiceSelector,
    /// Branch Target Buffer.
    btb: Btb,
    /// Token issuer for this instance.
    issuer: Issuer,
    /// Resolution statistics.
    stats: PredictorStats,
}

impl TournamentPredictor {
    /// Creates a new Tournament Predictor based on the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for any zero, oversized, or non-power-of-two
    /// geometry.
    pub fn new(config: &TournamentConfig) -> Result<Self, ConfigError> {
        let local = LocalPredictor::new(
            config.local_history_bits,
            config.local_table_size,
            config.local_bias,
        )?;
        let global = GlobalPredictor::new(config.global_history_bits, config.global_bias)?;
        let choice = ChoiceSelector::new(config.choice_table_size, config.choice_bias)?;
        let btb = Btb::new(config.btb_sets, config.btb_assoc, config.btb_replacement)?;

        debug!(
            local_history_table = config.local_table_size,
            local_history_bits = config.local_history_bits,
            local_counters = local.table().len(),
            global_history_bits = config.global_history_bits,
            global_counters = global.table().len(),
            choice_counters = config.choice_table_size,
            btb_sets = config.btb_sets,
            btb_assoc = config.btb_assoc,
            "tournament predictor configured"
        );

        Ok(Self {
            local,
            global,
            choice,
            btb,
            issuer: Issuer::new(),
            stats: PredictorStats::default(),
        })
    }

    /// The local sub-predictor.
    pub const fn local(&self) -> &LocalPredictor {
        &self.local
    }

    /// The global sub-predictor.
    pub const fn global(&self) -> &GlobalPredictor {
        &self.global
    }

    /// The choice selector.
    pub const fn choice(&self) -> &ChoiceSelector {
        &self.choice
    }

    /// The Branch Target Buffer.
    pub const fn btb(&self) -> &Btb {
        &self.btb
    }

    /// Snapshot of how the pattern table counters are distributed.
    pub fn distribution(&self) -> TournamentDistribution {
        TournamentDistribution {
            local: self.local.table().distribution(),
            global: self.global.table().distribution(),
            choice: self.choice.table().distribution(),
            ghr: self.global.ghr(),
        }
    }
}

impl BranchPredictor for TournamentPredictor {
    type Token = TournamentToken;

    /// Predicts branch direction and target.
    ///
    /// Queries both sub-predictors and lets the choice selector, indexed by the
    /// current GHR, decide which one to follow. Taken predictions consult the BTB.
    fn predict(&self, pc: u64) -> Prediction<TournamentToken> {
        let (local_taken, local) = self.local.lookup(pc);
        let (global_taken, global) = self.global.lookup();
        let (winner, choice) = self.choice.lookup(self.global.ghr());

        let taken = match winner {
            Winner::Local => local_taken,
            Winner::Global => global_taken,
        };
        let target = if taken { self.btb.lookup(pc) } else { None };

        Prediction {
            taken,
            target,
            token: TournamentToken {
                stamp: self.issuer.stamp(),
                pc,
                local,
                global,
                choice,
                local_taken,
                global_taken,
                winner,
                target,
            },
        }
    }

    /// Trains every component with the resolved outcome.
    ///
    /// Counters first (both sub-predictors unconditionally, the selector only on
    /// disagreement), then the local and global histories, then the BTB for taken
    /// branches.
    fn resolve(&mut self, token: TournamentToken, taken: bool, target: u64) -> Result<(), ResolveError> {
        self.issuer.check(token.stamp)?;

        self.local.train(token.local, taken);
        self.global.train(token.global, taken);

        let local_correct = token.local_taken == taken;
        let global_correct = token.global_taken == taken;
        self.choice.train(token.choice, local_correct, global_correct);

        self.local.update_history(token.pc, taken);
        self.global.update_history(taken);

        if taken {
            self.btb.update(token.pc, target);
        }

        let predicted = token.predicted_taken();
        self.stats.record_direction(predicted, taken);
        match token.winner {
            Winner::Local => self.stats.local_selected += 1,
            Winner::Global => self.stats.global_selected += 1,
        }
        if local_correct != global_correct {
            self.stats.choice_updates += 1;
        }
        if predicted {
            match token.target {
                None => self.stats.unknown_targets += 1,
                Some(t) if taken && t != target => self.stats.target_misses += 1,
                Some(_) => {}
            }
        }

        trace!(
            pc = token.pc,
            predicted,
            taken,
            winner = ?token.winner,
            ghr = self.global.ghr(),
            "tournament resolve"
        );
        Ok(())
    }

    fn reset(&mut self) {
        self.local.reset();
        self.global.reset();
        self.choice.reset();
        self.btb.reset();
        self.issuer.advance();
        self.stats = PredictorStats::default();
        debug!("tournament predictor reset");
    }

    fn stats(&self) -> &PredictorStats {
        &self.stats
    }
}
