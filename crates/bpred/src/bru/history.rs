//! Branch History Registers.
//!
//! Two encodings of recent branch outcomes are used:
//! 1. **Binary:** A fixed-width shift register (`HistoryRegister`) indexing the
//!    counter tables, newest outcome in bit 0.
//! 2. **Bipolar:** A vector of `+1`/`-1` inputs (`BipolarHistory`) feeding the
//!    perceptron, with a constant `+1` bias input at position 0.

use crate::common::ConfigError;
use crate::common::constants::MAX_HISTORY_BITS;

/// Fixed-width shift register of branch outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRegister {
    /// Current history; always below `1 << width`.
    value: u32,
    /// Mask of `width` low bits.
    mask: u32,
}

impl HistoryRegister {
    /// Creates a cleared register `width` bits wide.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HistoryWidth`] unless `1 <= width <= 30`.
    pub fn new(register: &'static str, width: u32) -> Result<Self, ConfigError> {
        if width == 0 || width > MAX_HISTORY_BITS {
            return Err(ConfigError::HistoryWidth {
                register,
                bits: width,
                max: MAX_HISTORY_BITS,
            });
        }
        Ok(Self {
            value: 0,
            mask: (1u32 << width) - 1,
        })
    }

    /// Current history value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.value
    }

    /// Width in bits.
    #[inline]
    pub const fn width(self) -> u32 {
        self.mask.count_ones()
    }

    /// Shifts `taken` into bit 0, discarding the oldest bit.
    #[inline]
    pub const fn shift_in(&mut self, taken: bool) {
        self.value = ((self.value << 1) | taken as u32) & self.mask;
    }

    /// Clears the history to all not-taken.
    #[inline]
    pub const fn clear(&mut self) {
        self.value = 0;
    }
}

/// Bipolar global history for the perceptron predictor.
///
/// `inputs[0]` is the synthetic bias input and is always `+1`; `inputs[1]` is
/// the most recent outcome and `inputs[len]` the oldest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BipolarHistory {
    inputs: Vec<i8>,
}

impl BipolarHistory {
    /// Creates a history of `len` outcomes, all initialized to taken (`+1`).
    pub fn new(len: usize) -> Self {
        Self {
            inputs: vec![1; len + 1],
        }
    }

    /// Number of tracked outcomes, excluding the bias input.
    pub fn len(&self) -> usize {
        self.inputs.len() - 1
    }

    /// Always false for a constructed predictor; history length is at least one.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All inputs including the bias at position 0.
    #[inline]
    pub fn inputs(&self) -> &[i8] {
        &self.inputs
    }

    /// Input at position `i` (`0` is the bias).
    #[inline]
    pub fn get(&self, i: usize) -> i8 {
        self.inputs[i]
    }

    /// Pushes the newest outcome into position 1, ageing all others by one.
    ///
    /// The oldest outcome falls off the end; the bias input is untouched.
    pub fn push(&mut self, taken: bool) {
        let history = &mut self.inputs[1..];
        history.rotate_right(1);
        history[0] = if taken { 1 } else { -1 };
    }

    /// Restores every outcome to taken.
    pub fn reset(&mut self) {
        self.inputs.fill(1);
    }
}
