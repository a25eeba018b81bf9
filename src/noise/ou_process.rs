//! Ornstein-Uhlenbeck Noise Process
//!
//! Discrete-time, mean-reverting noise with one independent component per
//! state dimension:
//!
//!   state <- state * (1 - decay_theta) + sigma * N(0, 1)
//!
//! The process reverts toward zero at rate `decay_theta` per step. Samples are
//! reproducible for a fixed seed. `reset` restores the initial state but keeps
//! the generator where it is, so consecutive episodes continue one noise stream.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::params::{OUParams, ParamsError};
use super::NoiseProcess;

/// Multivariate OU noise generator
#[derive(Debug, Clone)]
pub struct OUProcess<R = StdRng> {
    decay_theta: f64,
    sigma: f64,
    /// Template restored on reset
    initial_value: Vec<f64>,
    state: Vec<f64>,
    rng: R,
}

impl OUProcess<StdRng> {
    /// Create a process seeded with `seed`
    pub fn new(decay_theta: f64, sigma: f64, initial_value: &[f64], seed: u64) -> Self {
        Self::with_rng(decay_theta, sigma, initial_value, StdRng::seed_from_u64(seed))
    }

    /// Validate `params` and build a seeded process from them
    pub fn from_params(params: &OUParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self::new(
            params.decay_theta,
            params.sigma,
            &params.initial_value,
            params.seed,
        ))
    }
}

impl<R: Rng> OUProcess<R> {
    /// Create a process driven by a caller-supplied generator
    pub fn with_rng(decay_theta: f64, sigma: f64, initial_value: &[f64], rng: R) -> Self {
        tracing::debug!(
            "OU process: theta={} sigma={} dim={}",
            decay_theta,
            sigma,
            initial_value.len()
        );
        Self {
            decay_theta,
            sigma,
            initial_value: initial_value.to_vec(),
            state: initial_value.to_vec(),
            rng,
        }
    }

    /// Restore the initial state; the generator is not rewound
    pub fn reset(&mut self) {
        self.state.copy_from_slice(&self.initial_value);
    }

    /// Advance one step and return a copy of the new state
    pub fn sample(&mut self) -> Vec<f64> {
        let retain = 1.0 - self.decay_theta;
        for s in self.state.iter_mut() {
            let z: f64 = self.rng.sample(StandardNormal);
            *s = *s * retain + self.sigma * z;
        }
        tracing::trace!("OU sample: {:?}", self.state);
        self.state.clone()
    }

    pub fn state(&self) -> &[f64] {
        &self.state
    }

    pub fn dim(&self) -> usize {
        self.state.len()
    }

    pub fn decay_theta(&self) -> f64 {
        self.decay_theta
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn initial_value(&self) -> &[f64] {
        &self.initial_value
    }
}

impl<R: Rng> NoiseProcess for OUProcess<R> {
    fn reset(&mut self) {
        OUProcess::reset(self)
    }

    fn sample(&mut self) -> Vec<f64> {
        OUProcess::sample(self)
    }

    fn state(&self) -> &[f64] {
        OUProcess::state(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_without_crash() {
        let mut p = OUProcess::new(0.1, 0.01, &[0.0], 1234);
        for _ in 0..10 {
            let s = p.sample();
            assert_eq!(s.len(), 1);
            assert!(s[0].is_finite());
        }
    }

    #[test]
    fn test_zero_sigma_decays_deterministically() {
        let theta = 0.25;
        let mut p = OUProcess::new(theta, 0.0, &[8.0, -4.0], 1);

        let mut expected = [8.0, -4.0];
        for _ in 0..20 {
            let s = p.sample();
            for (e, v) in expected.iter_mut().zip(&s) {
                *e *= 1.0 - theta;
                assert!((v - *e).abs() < 1e-12);
            }
        }
        assert!(p.state().iter().all(|v| v.abs() < 0.05));
    }

    #[test]
    fn test_full_decay_discards_state() {
        let mut p = OUProcess::new(1.0, 0.0, &[3.0], 9);
        assert_eq!(p.sample(), vec![0.0]);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = OUProcess::new(0.15, 0.3, &[0.0, 1.0, 2.0], 42);
        let mut b = OUProcess::new(0.15, 0.3, &[0.0, 1.0, 2.0], 42);
        for _ in 0..50 {
            assert_eq!(a.sample(), b.sample());
        }
    }

    #[test]
    fn test_different_seed_different_stream() {
        let mut a = OUProcess::new(0.15, 0.3, &[0.0], 1);
        let mut b = OUProcess::new(0.15, 0.3, &[0.0], 2);
        let sa: Vec<Vec<f64>> = (0..5).map(|_| a.sample()).collect();
        let sb: Vec<Vec<f64>> = (0..5).map(|_| b.sample()).collect();
        assert_ne!(sa, sb);
    }

    #[test]
    fn test_reset_restores_state_but_not_rng() {
        // theta = 1 discards the previous state, so a sample equals the raw draw
        let mut p = OUProcess::new(1.0, 1.0, &[5.0], 77);
        let mut reference = OUProcess::new(1.0, 1.0, &[5.0], 77);

        let first = p.sample();
        p.sample();
        p.reset();
        assert_eq!(p.state(), &[5.0]);

        let after_reset = p.sample();
        let expected: Vec<Vec<f64>> = (0..3).map(|_| reference.sample()).collect();
        assert_eq!(after_reset, expected[2]);
        assert_ne!(after_reset, first);
    }

    #[test]
    fn test_returned_sample_is_a_copy() {
        let mut p = OUProcess::new(0.5, 0.0, &[2.0], 3);
        let mut s = p.sample();
        s[0] = 100.0;
        assert_eq!(p.state(), &[1.0]);
    }

    #[test]
    fn test_initial_value_is_copied() {
        let mut init = vec![1.0, 2.0];
        let mut p = OUProcess::new(0.5, 0.0, &init, 3);
        init[0] = -50.0;
        p.sample();
        p.reset();
        assert_eq!(p.state(), &[1.0, 2.0]);
        assert_eq!(p.initial_value(), &[1.0, 2.0]);
    }

    #[test]
    fn test_dimension_is_fixed() {
        let mut p = OUProcess::new(0.1, 0.5, &[0.0; 6], 5);
        assert_eq!(p.dim(), 6);
        for _ in 0..10 {
            assert_eq!(p.sample().len(), 6);
        }
        p.reset();
        assert_eq!(p.dim(), 6);
    }

    #[test]
    fn test_stationary_variance() {
        let (theta, sigma) = (0.1_f64, 1.0_f64);
        let mut p = OUProcess::new(theta, sigma, &[0.0], 2024);

        // Burn in, then collect
        for _ in 0..500 {
            p.sample();
        }
        let n = 50_000;
        let (mut sum, mut sum_sq) = (0.0, 0.0);
        for _ in 0..n {
            let v = p.sample()[0];
            sum += v;
            sum_sq += v * v;
        }
        let mean = sum / n as f64;
        let var = sum_sq / n as f64 - mean * mean;

        let expected = sigma * sigma / (1.0 - (1.0 - theta).powi(2));
        assert!((var - expected).abs() / expected < 0.2, "var={} expected={}", var, expected);
    }

    #[test]
    fn test_from_params_validates() {
        let bad = OUParams::default().with_sigma(-1.0);
        assert!(matches!(OUProcess::from_params(&bad), Err(ParamsError::InvalidSigma(_))));

        let empty = OUParams::default().with_initial_value(vec![]);
        assert!(matches!(OUProcess::from_params(&empty), Err(ParamsError::EmptyInitialValue)));

        let good = OUParams::default().with_initial_value(vec![0.5, 0.5]);
        let p = OUProcess::from_params(&good).unwrap();
        assert_eq!(p.dim(), 2);
        assert_eq!(p.decay_theta(), 0.1);
        assert_eq!(p.sigma(), 0.01);
    }

    #[test]
    fn test_with_custom_rng() {
        let rng = StdRng::seed_from_u64(11);
        let mut custom = OUProcess::with_rng(0.2, 0.4, &[0.0, 0.0], rng);
        let mut seeded = OUProcess::new(0.2, 0.4, &[0.0, 0.0], 11);
        assert_eq!(custom.sample(), seeded.sample());
    }
}
