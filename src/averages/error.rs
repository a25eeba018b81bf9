//! Estimator Error Types

use thiserror::Error;

/// Errors raised by streaming estimators
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StatError {
    /// `get` was called before any value was observed and no initial value was given
    #[error("Estimator read before any update and without an initial value")]
    Uninitialized,

    /// Half-life must be finite and strictly positive
    #[error("Invalid half-life: {0} (must be finite and > 0)")]
    InvalidHalfLife(f64),
}
