//! CLI Adapter
//!
//! Command-line interface for the ou-noise tool.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, SimulateCmd, SmoothCmd};

use anyhow::Result;

/// Parse the command line
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}

/// Execute the CLI command
pub fn execute(app: CliApp) -> Result<()> {
    commands::execute(app)
}
