//! airdep CLI binary.
//!
//! This is the entry point for the `airdep` command-line tool. It parses
//! arguments with `clap`, loads the global configuration, initializes
//! logging via `tracing`, and dispatches to the appropriate command handler.

mod cli;
mod commands;

use airdep_core::config::GlobalConfig;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::parse();

    let config = match GlobalConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(env_filter(args.verbose, None));
            return Err(e);
        }
    };
    init_logging(env_filter(args.verbose, config.log.level.as_deref()));

    commands::dispatch(args, &config)
}

/// `RUST_LOG`, else `debug` when verbose, else the configured level, else `warn`.
fn env_filter(verbose: bool, configured: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if verbose {
        return EnvFilter::new("debug");
    }
    configured
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn init_logging(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
