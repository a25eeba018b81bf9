//! Configuration Loader
//!
//! Loads and validates simulation settings from a TOML file:
//!
//! ```toml
//! [process]
//! decay_theta = 0.1
//! sigma = 0.01
//! initial_value = [0.0, 0.0]
//! seed = 1234
//!
//! [memory]      # optional, enables delayed average feedback
//! halflife = 30.0
//! delay = 10
//! sign = 1.0
//!
//! [rollout]     # optional
//! episodes = 1
//! steps = 100
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::application::RolloutConfig;
use crate::noise::{MemoryParams, OUParams, DEFAULT_SEED};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub process: ProcessSection,
    #[serde(default)]
    pub memory: Option<MemorySection>,
    #[serde(default)]
    pub rollout: RolloutSection,
}

/// OU process section
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessSection {
    /// Per-step mean reversion strength (0-1)
    pub decay_theta: f64,
    /// Noise scale
    pub sigma: f64,
    /// Starting state, its length sets the dimensionality
    pub initial_value: Vec<f64>,
    /// Generator seed
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Memory feedback section (optional)
#[derive(Debug, Clone, Deserialize)]
pub struct MemorySection {
    /// EWMA half-life in steps
    #[serde(default = "default_memory_halflife")]
    pub halflife: f64,
    /// Steps before a state enters the average
    #[serde(default = "default_memory_delay")]
    pub delay: usize,
    /// Feedback multiplier, usually +1 or -1
    #[serde(default = "default_memory_sign")]
    pub sign: f64,
}

/// Rollout section (optional)
#[derive(Debug, Clone, Deserialize)]
pub struct RolloutSection {
    #[serde(default = "default_episodes")]
    pub episodes: usize,
    #[serde(default = "default_steps")]
    pub steps: usize,
}

impl Default for RolloutSection {
    fn default() -> Self {
        Self {
            episodes: default_episodes(),
            steps: default_steps(),
        }
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_memory_halflife() -> f64 {
    MemoryParams::default().halflife
}

fn default_memory_delay() -> usize {
    MemoryParams::default().delay
}

fn default_memory_sign() -> f64 {
    MemoryParams::default().sign
}

fn default_episodes() -> usize {
    RolloutConfig::default().episodes
}

fn default_steps() -> usize {
    RolloutConfig::default().steps
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        OUParams::from(self)
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if let Some(memory) = self.memory_params() {
            memory
                .validate()
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }

        RolloutConfig::from(self)
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        Ok(())
    }

    /// Memory parameters, if the `[memory]` section is present
    pub fn memory_params(&self) -> Option<MemoryParams> {
        self.memory.as_ref().map(|m| MemoryParams {
            halflife: m.halflife,
            delay: m.delay,
            sign: m.sign,
        })
    }
}

impl From<&Config> for OUParams {
    fn from(config: &Config) -> Self {
        OUParams {
            decay_theta: config.process.decay_theta,
            sigma: config.process.sigma,
            initial_value: config.process.initial_value.clone(),
            seed: config.process.seed,
        }
    }
}

impl From<&Config> for RolloutConfig {
    fn from(config: &Config) -> Self {
        RolloutConfig {
            episodes: config.rollout.episodes,
            steps: config.rollout.steps,
        }
    }
}
