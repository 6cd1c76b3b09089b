//! Umber CLI - batch image toning with a sequential/parallel comparison.
//!
//! Umber tones every image in a directory (grayscale, then sepia) and can
//! run the batch sequentially, through the staged concurrent pipeline, or
//! both back to back with a timing comparison.
//!
//! # Usage
//!
//! ```bash
//! # Tone a directory both ways and compare
//! umber run ./photos
//!
//! # Parallel only, with an explicit pool size
//! umber run ./photos --mode parallel --workers 8
//!
//! # View configuration
//! umber config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Umber - batch image toning pipeline.
#[derive(Parser, Debug)]
#[command(name = "umber")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Tone a directory of images
    Run(cli::run::RunArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go to stderr directly.
    let config = match umber_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `umber config path`."
            );
            umber_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Umber v{}", umber_core::VERSION);

    match cli.command {
        Commands::Run(args) => cli::run::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
