//! ou-noise - Delayed Averages and OU Exploration Noise
//!
//! Stateful estimators and a stochastic process generator for injecting
//! temporally-correlated, time-delayed noise into a simulation.
//!
//! # Modules
//!
//! - `averages`: Streaming estimators (Ewma, RunningMean, DelayedStat)
//! - `noise`: Ornstein-Uhlenbeck processes, with and without memory feedback
//! - `application`: Rollout runner that resets and samples a process per episode
//! - `config`: TOML configuration loading and validation
//! - `adapters`: Command-line interface

pub mod averages;
pub mod noise;
pub mod application;
pub mod config;
pub mod adapters;

pub use averages::{DelayedStat, Ewma, RunningMean, StatError, Statistic};
pub use noise::{MemoryParams, NoiseProcess, OUParams, OUProcess, OUProcessWithMemory};
