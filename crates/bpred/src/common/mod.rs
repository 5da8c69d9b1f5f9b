//! Common utilities and types shared by every predictor component.
//!
//! This module provides:
//! 1. **Constants:** Address alignment shift and capacity limits.
//! 2. **Error Handling:** Construction-time configuration errors and resolve-time misuse errors.

/// Address alignment and table capacity constants.
pub mod constants;

/// Configuration and resolution error types.
pub mod error;

pub use constants::BRANCH_SHIFT;
pub use error::{ConfigError, ResolveError};
