//! Grove CLI - run and inspect arena matches.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grove")]
#[command(author, version, about = "Grove - archons, gardeners and a shared economy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default grove.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Play a match
    Run {
        /// Rounds to play (default: until the match is decided)
        #[arg(short, long)]
        rounds: Option<u64>,

        /// Override the configured seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Config file (default: grove.toml in this or a parent directory)
        #[arg(short, long)]
        config: Option<String>,

        /// Print final statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Config file (default: grove.toml in this or a parent directory)
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run {
            rounds,
            seed,
            config,
            json,
        } => commands::run::run(commands::run::RunArgs {
            rounds,
            seed,
            config,
            json,
            verbose: cli.verbose,
        }),
        Commands::Config { config } => commands::show::run(config),
    }
}
