//! Exponentially-Weighted Moving Average
//!
//! Smoothing is parameterized by half-life: the number of updates after which
//! the weight of an observation has decayed to one half.
//!
//! Recursion: x_t = gamma * x_{t-1} + (1 - gamma) * x, with gamma = 2^(-1 / half_life)
//!
//! The first observation is taken verbatim unless an initial value was supplied.

use super::{Statistic, StatError};

/// Exponentially-weighted moving average over a scalar stream
#[derive(Debug, Clone, PartialEq)]
pub struct Ewma {
    /// Steps for an observation's weight to halve
    halflife: f64,
    /// Per-step retention of the previous estimate
    gamma: f64,
    /// Value restored by `reset`
    initial: Option<f64>,
    /// Current estimate, absent until the first update
    value: Option<f64>,
}

impl Ewma {
    /// Create an EWMA with no initial value
    ///
    /// # Panics
    /// Panics if `halflife` is not finite and strictly positive.
    /// Use [`Ewma::try_new`] to handle that case.
    pub fn new(halflife: f64) -> Self {
        Self::checked(halflife, None)
    }

    /// Create an EWMA that reads `initial_value` before any update
    ///
    /// # Panics
    /// Panics if `halflife` is not finite and strictly positive.
    pub fn with_initial(halflife: f64, initial_value: f64) -> Self {
        Self::checked(halflife, Some(initial_value))
    }

    /// Fallible constructor
    pub fn try_new(halflife: f64, initial_value: Option<f64>) -> Result<Self, StatError> {
        if !halflife.is_finite() || halflife <= 0.0 {
            return Err(StatError::InvalidHalfLife(halflife));
        }
        Ok(Self::build(halflife, initial_value))
    }

    fn checked(halflife: f64, initial: Option<f64>) -> Self {
        Self::try_new(halflife, initial)
            .unwrap_or_else(|e| panic!("half-life must be positive: {}", e))
    }

    fn build(halflife: f64, initial: Option<f64>) -> Self {
        Self {
            halflife,
            gamma: (-1.0 / halflife).exp2(),
            initial,
            value: initial,
        }
    }

    pub fn halflife(&self) -> f64 {
        self.halflife
    }

    /// Decay factor, satisfies gamma^halflife == 0.5
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Whether a value is held (observed or supplied at construction)
    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }

    /// Current estimate without the error wrapper
    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

impl Statistic for Ewma {
    fn update(&mut self, x: f64) {
        self.value = Some(match self.value {
            None => x,
            Some(prev) => self.gamma * prev + (1.0 - self.gamma) * x,
        });
    }

    fn get(&self) -> Result<f64, StatError> {
        self.value.ok_or(StatError::Uninitialized)
    }

    fn reset(&mut self) {
        self.value = self.initial;
    }
}
