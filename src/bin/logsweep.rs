//! One-shot maintenance binary: parse flags, run a single rotation pass,
//! exit. Scheduling belongs to cron or a systemd timer, not to this tool.

use clap::Parser;
use logsweep::cli::{Cli, run};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // RUST_LOG wins; default keeps per-file decisions visible without debug noise
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("logsweep=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    run(&Cli::parse())
}
