//! Running Mean
//!
//! Cumulative mean and variance over every observation seen, using Welford's
//! update so long streams stay numerically stable.

use super::{Statistic, StatError};

/// Cumulative arithmetic mean with sample variance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningMean {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningMean {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Unbiased sample variance, zero with fewer than two observations
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        self.m2 / (self.count - 1) as f64
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl Statistic for RunningMean {
    fn update(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    fn get(&self) -> Result<f64, StatError> {
        if self.count == 0 {
            return Err(StatError::Uninitialized);
        }
        Ok(self.mean)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
