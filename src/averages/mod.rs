//! Averages - Streaming Scalar Estimators
//!
//! Recursive estimators that consume one observation per tick:
//! - `Ewma`: exponentially-weighted moving average parameterized by half-life
//! - `RunningMean`: cumulative mean and variance (Welford)
//! - `DelayedStat`: fixed-lag wrapper that delays what any estimator observes
//!
//! All estimators implement the `Statistic` trait so wrappers can be stacked.

pub mod error;
pub mod ewma;
pub mod delayed;
pub mod running_mean;

pub use error::StatError;
pub use ewma::Ewma;
pub use delayed::DelayedStat;
pub use running_mean::RunningMean;

/// A streaming estimator over a scalar input
#[cfg_attr(test, mockall::automock)]
pub trait Statistic {
    /// Feed one observation
    fn update(&mut self, x: f64);

    /// Current estimate
    fn get(&self) -> Result<f64, StatError>;

    /// Return to the state the estimator was constructed in
    fn reset(&mut self);
}
