//! # Main — CLI Entry Point
//!
//! Parses arguments, sets up logging and the rayon pool, resolves the
//! generator configuration and hands off to the subcommand runners in
//! `cli.rs`. With no subcommand the interactive prompt starts.
//!
//! ## Subcommands
//!
//! - `repl`: prompt for ranks until `stop` or end of input.
//! - `get`: print the date at each given rank.
//! - `batch`: summarise every date with a given number of pairs.
//!
//! ## Global Options
//!
//! - `--check` / `ALMANAC_CHECK`: validate every generated date (strict mode).
//! - `--config` / `ALMANAC_CONFIG`: TOML file with a `[generator]` section.
//! - `--sequential`: solve the partitions of a batch on one thread.
//! - `--threads`: rayon pool size (all cores when unset).
//!
//! Logging goes to stderr; `LOG_FORMAT=json` switches to JSON lines and
//! `RUST_LOG` overrides the default `warn` filter.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "almanac", about = "Find the n-th self-descriptive date")]
struct Cli {
    /// Re-validate every generated date and abort on any inconsistency
    #[arg(long, env = "ALMANAC_CHECK")]
    check: bool,

    /// Path to a TOML configuration file
    #[arg(long, env = "ALMANAC_CONFIG")]
    config: Option<PathBuf>,

    /// Generate each batch on a single thread
    #[arg(long)]
    sequential: bool,

    /// Number of rayon worker threads (defaults to all logical cores)
    #[arg(long)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for ranks interactively (the default)
    Repl,
    /// Print the self-descriptive date at each rank (1 = smallest)
    Get {
        /// One or more ranks
        #[arg(required = true, allow_negative_numbers = true)]
        ranks: Vec<String>,
    },
    /// Summarise all dates made of exactly PAIRS pairs
    Batch {
        /// Number of (frequency, digit) pairs
        pairs: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::configure_rayon(cli.threads);
    let config = cli::resolve_config(&cli)?;

    match &cli.command {
        None | Some(Commands::Repl) => cli::run_repl(config),
        Some(Commands::Get { ranks }) => cli::run_get(config, ranks),
        Some(Commands::Batch { pairs, json }) => cli::run_batch(config, *pairs, *json),
    }
}
