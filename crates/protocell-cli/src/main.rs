//! Protocell CLI - run the artificial-life engine headless.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "protocell")]
#[command(author, version, about = "Protocell - cells, organisms and the days between them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (engine logs at debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: protocell.toml in this or a parent directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Random seed; overrides the config file
    #[arg(short, long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default protocell.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Run the simulation and print the event stream
    Run {
        /// Number of simulated days
        #[arg(short, long, default_value = "100")]
        days: u64,

        /// Real time per frame, in milliseconds
        #[arg(short, long, default_value = "1000")]
        frame_ms: u64,

        /// Extra random organisms to spawn before the first frame
        #[arg(long, default_value = "0")]
        spawn: usize,

        /// Print events as JSON lines instead of text
        #[arg(long)]
        json: bool,

        /// Only print the final summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run for a number of days and print population statistics
    Stats {
        /// Number of simulated days
        #[arg(short, long, default_value = "0")]
        days: u64,
    },

    /// Run for a number of days and dump the world snapshot as JSON
    Snapshot {
        /// Number of simulated days
        #[arg(short, long, default_value = "0")]
        days: u64,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let load = || config::load(cli.config.as_deref(), cli.seed);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run { days, frame_ms, spawn, json, quiet } => commands::run::run(
            load()?,
            commands::run::RunOptions { days, frame_ms, spawn, json, quiet },
        ),
        Commands::Stats { days } => commands::stats::run(load()?, days),
        Commands::Snapshot { days, output } => commands::snapshot::run(load()?, days, output),
        Commands::Config => commands::config::run(load()?),
    }
}
