//! Roster
//!
//! Runs batches of enrollment registry commands from a file and prints one
//! result block per test case.

use anyhow::{Context, Result};
use clap::Parser;
use enrollment_registry::{BatchRunner, RegistryConfig, RemovePolicy};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Run enrollment registry test cases from a command file")]
struct Args {
    /// Command file, test cases separated by the sentinel line
    input: PathBuf,

    /// TOML configuration file
    #[arg(short, long, env = "ROSTER_CONFIG")]
    config: Option<PathBuf>,

    /// Handling of `remove` for unknown learners (report or ignore)
    #[arg(long, env = "ROSTER_REMOVE_POLICY")]
    remove_policy: Option<RemovePolicy>,

    /// Line that ends a test case
    #[arg(long)]
    sentinel: Option<String>,
}

/// Config file (or defaults) with command-line and environment overrides on top.
fn resolve_config(args: &Args) -> Result<RegistryConfig> {
    let mut config = match &args.config {
        Some(path) => RegistryConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RegistryConfig::default(),
    };
    config.apply_overrides(args.remove_policy, args.sentinel.clone());
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = resolve_config(&args)?;
    debug!(?config, "Configuration resolved");

    let runner = BatchRunner::new(config)?;

    let input = File::open(&args.input)
        .with_context(|| format!("opening input {}", args.input.display()))?;
    let stdout = io::stdout();
    let summary = runner.run(BufReader::new(input), BufWriter::new(stdout.lock()))?;

    info!(
        cases = summary.cases,
        commands = summary.commands,
        errors = summary.errors,
        "Batch finished"
    );

    Ok(())
}
