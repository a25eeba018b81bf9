//! CLI Command Handlers
//!
//! Implementation of all CLI commands for the ou-noise tool.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::BufRead;
use std::path::PathBuf;

use crate::application::{DimensionSummary, RolloutConfig, RolloutReport, RolloutRunner};
use crate::averages::{DelayedStat, Ewma, Statistic, StatError};
use crate::config::load_config;
use crate::noise::{MemoryParams, NoiseProcess, OUParams, OUProcess, OUProcessWithMemory};

/// ou-noise - Ornstein-Uhlenbeck exploration noise with delayed memory feedback
#[derive(Parser, Debug)]
#[command(
    name = "ou-noise",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Ornstein-Uhlenbeck exploration noise with delayed memory feedback",
    long_about = "Generates temporally-correlated noise for simulation rollouts and runs \
                  delayed exponentially-weighted averages over number streams."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a noise rollout and print every sample
    Simulate(SimulateCmd),

    /// Feed numbers through a delayed EWMA
    Smooth(SmoothCmd),
}

/// Run a noise rollout
#[derive(Parser, Debug)]
pub struct SimulateCmd {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override ticks per episode
    #[arg(long, value_name = "N")]
    pub steps: Option<usize>,

    /// Override number of episodes
    #[arg(long, value_name = "N")]
    pub episodes: Option<usize>,

    /// Override generator seed
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Override dimensionality with a zero initial state
    #[arg(long, value_name = "N")]
    pub dim: Option<usize>,

    /// Enable memory feedback with default parameters if the config has none
    #[arg(short, long)]
    pub memory: bool,

    /// Output format (text, json)
    #[arg(short, long, value_name = "FORMAT", default_value = "text")]
    pub format: String,
}

/// Smooth a number stream
#[derive(Parser, Debug)]
pub struct SmoothCmd {
    /// EWMA half-life in steps
    #[arg(long, value_name = "STEPS")]
    pub halflife: f64,

    /// Steps each value waits before entering the average
    #[arg(long, value_name = "STEPS", default_value = "0")]
    pub delay: usize,

    /// Value reported before anything has reached the average
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub initial: Option<f64>,

    /// Values to feed, read from stdin when omitted
    #[arg(value_name = "VALUES", allow_negative_numbers = true)]
    pub values: Vec<f64>,
}

/// Execute the CLI command
pub fn execute(app: CliApp) -> Result<()> {
    match app.command {
        Command::Simulate(cmd) => simulate_command(cmd),
        Command::Smooth(cmd) => smooth_command(cmd),
    }
}

#[derive(Serialize)]
struct SimulationOutput<'a> {
    memory: Option<&'a MemoryParams>,
    params: &'a OUParams,
    report: &'a RolloutReport,
    summary: Vec<DimensionSummary>,
}

/// Handle simulate command
fn simulate_command(cmd: SimulateCmd) -> Result<()> {
    let (mut params, mut memory, mut rollout) = match &cmd.config {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
            let config = load_config(&expanded)
                .with_context(|| format!("Failed to load configuration from {}", expanded))?;
            (
                OUParams::from(&config),
                config.memory_params(),
                RolloutConfig::from(&config),
            )
        }
        None => (OUParams::default(), None, RolloutConfig::default()),
    };

    if let Some(seed) = cmd.seed {
        params.seed = seed;
    }
    if let Some(dim) = cmd.dim {
        params.initial_value = vec![0.0; dim];
    }
    if let Some(steps) = cmd.steps {
        rollout.steps = steps;
    }
    if let Some(episodes) = cmd.episodes {
        rollout.episodes = episodes;
    }
    if cmd.memory && memory.is_none() {
        memory = Some(MemoryParams::default());
    }

    let process: Box<dyn NoiseProcess> = match &memory {
        Some(m) => Box::new(
            OUProcessWithMemory::from_params(&params, m).context("Invalid noise parameters")?,
        ),
        None => Box::new(OUProcess::from_params(&params).context("Invalid noise parameters")?),
    };

    tracing::info!(
        "Simulating {} episodes x {} steps (memory: {})",
        rollout.episodes,
        rollout.steps,
        memory.is_some()
    );

    let mut runner = RolloutRunner::new(process, rollout).context("Invalid rollout")?;
    let report = runner.run();
    let summary = report.summary();

    match cmd.format.as_str() {
        "json" => {
            let output = SimulationOutput {
                memory: memory.as_ref(),
                params: &params,
                report: &report,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "text" => {
            for record in &report.records {
                println!(
                    "{:>4} {:>6}  {}",
                    record.episode,
                    record.step,
                    format_vector(&record.state)
                );
            }
            println!();
            println!("{:>4} {:>12} {:>12} {:>12} {:>12}", "dim", "mean", "std_dev", "min", "max");
            for s in &summary {
                println!(
                    "{:>4} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
                    s.dimension, s.mean, s.std_dev, s.min, s.max
                );
            }
        }
        other => bail!("Unsupported output format: {} (expected text or json)", other),
    }

    Ok(())
}

/// Handle smooth command
fn smooth_command(cmd: SmoothCmd) -> Result<()> {
    let ewma = Ewma::try_new(cmd.halflife, cmd.initial).context("Invalid EWMA settings")?;
    let mut delayed = DelayedStat::new(ewma, cmd.delay);

    let values = if cmd.values.is_empty() {
        read_stdin_values()?
    } else {
        cmd.values
    };

    for (step, x) in values.into_iter().enumerate() {
        delayed.update(x);
        match delayed.get() {
            Ok(estimate) => println!("{:>6} {:>14.6} {:>14.6}", step, x, estimate),
            Err(StatError::Uninitialized) => println!("{:>6} {:>14.6} {:>14}", step, x, "-"),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn read_stdin_values() -> Result<Vec<f64>> {
    let stdin = std::io::stdin();
    let mut values = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        for token in line.split_whitespace() {
            let value: f64 = token
                .parse()
                .with_context(|| format!("Not a number: {}", token))?;
            values.push(value);
        }
    }
    Ok(values)
}

fn format_vector(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:>10.6}", v))
        .collect::<Vec<_>>()
        .join(" ")
}
