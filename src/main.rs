//! ou-noise - Ornstein-Uhlenbeck exploration noise with delayed memory feedback

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use ou_noise::adapters::cli;

fn main() -> Result<()> {
    // Load .env file if it exists (RUST_LOG and friends)
    dotenvy::dotenv().ok();

    let app = cli::init();
    init_logging(app.verbose, app.debug)?;

    cli::execute(app)
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
