//! Rollout Runner
//!
//! Drives a noise process through episodes the way a simulation loop does:
//! reset once per episode, sample once per tick. Also applies noise to an
//! action vector and summarizes a finished rollout per dimension.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use thiserror::Error;

use crate::noise::NoiseProcess;

/// Upper bound on records reserved before a rollout starts
const MAX_PREALLOCATED_RECORDS: usize = 1 << 16;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RolloutError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Dimension mismatch: noise has {expected} components, action has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Episode layout of a rollout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloutConfig {
    /// Number of episodes, the process is reset before each
    pub episodes: usize,
    /// Ticks per episode
    pub steps: usize,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            episodes: 1,
            steps: 100,
        }
    }
}

impl RolloutConfig {
    pub fn validate(&self) -> Result<(), RolloutError> {
        if self.episodes == 0 {
            return Err(RolloutError::ConfigError(
                "episodes must be > 0".to_string(),
            ));
        }
        if self.steps == 0 {
            return Err(RolloutError::ConfigError("steps must be > 0".to_string()));
        }
        self.total_steps()?;
        Ok(())
    }

    /// Ticks across all episodes
    pub fn total_steps(&self) -> Result<usize, RolloutError> {
        self.episodes.checked_mul(self.steps).ok_or_else(|| {
            RolloutError::ConfigError(format!(
                "episodes x steps overflows: {} x {}",
                self.episodes, self.steps
            ))
        })
    }
}

/// One sampled tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub episode: usize,
    pub step: usize,
    pub state: Vec<f64>,
}

/// Statistics of one state component over a whole rollout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionSummary {
    pub dimension: usize,
    pub mean: f64,
    /// Sample standard deviation, NaN with fewer than two records
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Everything sampled during a rollout
#[derive(Debug, Clone, Serialize)]
pub struct RolloutReport {
    pub dim: usize,
    pub records: Vec<StepRecord>,
}

impl RolloutReport {
    /// Per-dimension statistics across all episodes
    pub fn summary(&self) -> Vec<DimensionSummary> {
        (0..self.dim)
            .map(|d| {
                let column: Vec<f64> = self.records.iter().map(|r| r.state[d]).collect();
                DimensionSummary {
                    dimension: d,
                    mean: column.iter().mean(),
                    std_dev: column.iter().std_dev(),
                    min: Statistics::min(column.iter()),
                    max: Statistics::max(column.iter()),
                }
            })
            .collect()
    }

    /// Records belonging to one episode, in tick order
    pub fn episode(&self, episode: usize) -> impl Iterator<Item = &StepRecord> + '_ {
        self.records.iter().filter(move |r| r.episode == episode)
    }
}

/// Runs a noise process through a configured number of episodes
pub struct RolloutRunner<P> {
    process: P,
    config: RolloutConfig,
}

impl<P: NoiseProcess> RolloutRunner<P> {
    pub fn new(process: P, config: RolloutConfig) -> Result<Self, RolloutError> {
        config.validate()?;
        Ok(Self { process, config })
    }

    /// Reset before each episode and sample every tick
    pub fn run(&mut self) -> RolloutReport {
        let total = self.config.total_steps().unwrap_or(usize::MAX);
        let mut records = Vec::with_capacity(total.min(MAX_PREALLOCATED_RECORDS));

        for episode in 0..self.config.episodes {
            self.process.reset();
            tracing::debug!("Episode {} started", episode);

            for step in 0..self.config.steps {
                let state = self.process.sample();
                records.push(StepRecord {
                    episode,
                    step,
                    state,
                });
            }
        }

        tracing::info!(
            "Rollout finished: {} episodes x {} steps, dim={}",
            self.config.episodes,
            self.config.steps,
            self.process.dim()
        );

        RolloutReport {
            dim: self.process.dim(),
            records,
        }
    }

    /// Sample once and add the noise to `action` in place
    pub fn perturb(&mut self, action: &mut [f64]) -> Result<(), RolloutError> {
        let expected = self.process.dim();
        if action.len() != expected {
            return Err(RolloutError::DimensionMismatch {
                expected,
                actual: action.len(),
            });
        }
        let noise = self.process.sample();
        for (a, n) in action.iter_mut().zip(noise) {
            *a += n;
        }
        Ok(())
    }

    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    pub fn process(&self) -> &P {
        &self.process
    }

    pub fn into_process(self) -> P {
        self.process
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{MemoryParams, OUProcess, OUProcessWithMemory};

    fn config(episodes: usize, steps: usize) -> RolloutConfig {
        RolloutConfig { episodes, steps }
    }

    #[test]
    fn test_default_config() {
        let cfg = RolloutConfig::default();
        assert_eq!(cfg.episodes, 1);
        assert_eq!(cfg.steps, 100);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let process = OUProcess::new(0.1, 0.1, &[0.0], 1);
        assert!(matches!(
            RolloutRunner::new(process.clone(), config(0, 10)),
            Err(RolloutError::ConfigError(_))
        ));
        assert!(matches!(
            RolloutRunner::new(process, config(2, 0)),
            Err(RolloutError::ConfigError(_))
        ));
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let process = OUProcess::new(0.1, 0.1, &[0.0], 1);
        assert!(matches!(
            RolloutRunner::new(process.clone(), config(usize::MAX, 2)),
            Err(RolloutError::ConfigError(_))
        ));
        assert!(matches!(
            RolloutRunner::new(process, config(2, usize::MAX)),
            Err(RolloutError::ConfigError(_))
        ));

        assert_eq!(config(usize::MAX, 1).total_steps(), Ok(usize::MAX));
        assert_eq!(config(3, 7).total_steps(), Ok(21));
    }

    #[test]
    fn test_run_records_every_tick() {
        let process = OUProcess::new(0.1, 0.2, &[0.0, 0.0], 3);
        let mut runner = RolloutRunner::new(process, config(3, 7)).unwrap();
        let report = runner.run();

        assert_eq!(report.records.len(), 21);
        assert_eq!(report.dim, 2);
        assert_eq!(report.episode(1).count(), 7);

        let steps: Vec<usize> = report.episode(2).map(|r| r.step).collect();
        assert_eq!(steps, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_each_episode_starts_from_initial_state() {
        // Without noise every episode is the same deterministic decay
        let process = OUProcess::new(0.5, 0.0, &[8.0], 0);
        let mut runner = RolloutRunner::new(process, config(2, 3)).unwrap();
        let report = runner.run();

        let first: Vec<f64> = report.episode(0).map(|r| r.state[0]).collect();
        let second: Vec<f64> = report.episode(1).map(|r| r.state[0]).collect();
        assert_eq!(first, vec![4.0, 2.0, 1.0]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary() {
        let process = OUProcess::new(0.5, 0.0, &[8.0], 0);
        let mut runner = RolloutRunner::new(process, config(1, 3)).unwrap();
        let summary = runner.run().summary();

        assert_eq!(summary.len(), 1);
        let s = &summary[0];
        assert!((s.mean - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        // Sample variance of [4, 2, 1] is 7/3
        assert!((s.std_dev - (7.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_perturb_adds_noise() {
        let process = OUProcess::new(0.5, 0.0, &[2.0, -2.0], 0);
        let mut runner = RolloutRunner::new(process, RolloutConfig::default()).unwrap();

        let mut action = [10.0, 10.0];
        runner.perturb(&mut action).unwrap();
        assert_eq!(action, [11.0, 9.0]);
    }

    #[test]
    fn test_perturb_rejects_wrong_length() {
        let process = OUProcess::new(0.5, 0.0, &[0.0, 0.0], 0);
        let mut runner = RolloutRunner::new(process, RolloutConfig::default()).unwrap();

        let mut action = [1.0, 2.0, 3.0];
        let result = runner.perturb(&mut action);
        assert_eq!(
            result,
            Err(RolloutError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(action, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_boxed_process() {
        let process: Box<dyn NoiseProcess> = Box::new(OUProcessWithMemory::new(
            0.2,
            0.1,
            &[0.0; 3],
            MemoryParams::default(),
            9,
        ));
        let mut runner = RolloutRunner::new(process, config(2, 5)).unwrap();
        let report = runner.run();
        assert_eq!(report.dim, 3);
        assert_eq!(report.records.len(), 10);
        assert_eq!(runner.into_process().dim(), 3);
    }
}
