//! Noise Process Parameters
//!
//! Configuration structs for the OU processes and their memory term.
//! Defaults match a slow exploration noise: theta = 0.1, sigma = 0.01.

use serde::{Deserialize, Serialize};

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 1234;

/// Parameters shared by every OU process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OUParams {
    /// Per-step fraction of the state pulled back toward the reference
    pub decay_theta: f64,
    /// Scale applied to the standard-normal innovations
    pub sigma: f64,
    /// State restored on every reset, also fixes the dimensionality
    pub initial_value: Vec<f64>,
    /// Seed for the pseudo-random generator
    pub seed: u64,
}

impl Default for OUParams {
    fn default() -> Self {
        Self {
            decay_theta: 0.1,
            sigma: 0.01,
            initial_value: vec![0.0],
            seed: DEFAULT_SEED,
        }
    }
}

impl OUParams {
    pub fn with_decay_theta(mut self, decay_theta: f64) -> Self {
        self.decay_theta = decay_theta;
        self
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_initial_value(mut self, initial_value: Vec<f64>) -> Self {
        self.initial_value = initial_value;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate process parameters
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.decay_theta.is_finite() || !(0.0..=1.0).contains(&self.decay_theta) {
            return Err(ParamsError::InvalidDecayTheta(self.decay_theta));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(ParamsError::InvalidSigma(self.sigma));
        }
        if self.initial_value.is_empty() {
            return Err(ParamsError::EmptyInitialValue);
        }
        if let Some(bad) = self.initial_value.iter().find(|v| !v.is_finite()) {
            return Err(ParamsError::NonFiniteInitialValue(*bad));
        }
        Ok(())
    }
}

/// Parameters of the delayed moving-average feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryParams {
    /// EWMA half-life in steps
    pub halflife: f64,
    /// Steps before a past state enters the average
    pub delay: usize,
    /// Multiplier on the feedback, +1 attracts toward the past average, -1 repels
    pub sign: f64,
}

impl Default for MemoryParams {
    fn default() -> Self {
        Self {
            halflife: 30.0,
            delay: 10,
            sign: 1.0,
        }
    }
}

impl MemoryParams {
    pub fn with_halflife(mut self, halflife: f64) -> Self {
        self.halflife = halflife;
        self
    }

    pub fn with_delay(mut self, delay: usize) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_sign(mut self, sign: f64) -> Self {
        self.sign = sign;
        self
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.halflife.is_finite() || self.halflife <= 0.0 {
            return Err(ParamsError::InvalidHalfLife(self.halflife));
        }
        if !self.sign.is_finite() {
            return Err(ParamsError::InvalidSign(self.sign));
        }
        Ok(())
    }
}

/// Parameter validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamsError {
    #[error("Invalid decay theta: {0} (must be 0 <= theta <= 1)")]
    InvalidDecayTheta(f64),
    #[error("Invalid sigma: {0} (must be finite and >= 0)")]
    InvalidSigma(f64),
    #[error("Invalid initial value: must have at least one dimension")]
    EmptyInitialValue,
    #[error("Invalid initial value: {0} (must be finite)")]
    NonFiniteInitialValue(f64),
    #[error("Invalid memory half-life: {0} (must be finite and > 0)")]
    InvalidHalfLife(f64),
    #[error("Invalid memory sign: {0} (must be finite)")]
    InvalidSign(f64),
}
