//! stl: Command-line interface for STL polyhedron analysis.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=stl_analysis=info` - Basic operation logging
//! - `RUST_LOG=stl_analysis=debug` - Detailed parse/metric logging
//! - `RUST_LOG=stl_analysis::timing=debug` - Performance timing
//!
//! # Example
//!
//! ```bash
//! stl info model.stl
//! stl info model.stl --workers 8 --format json
//! stl rank model.stl --count 5 --largest
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{info, rank};

/// stl - inspect STL files and the polyhedra they describe.
#[derive(Parser)]
#[command(name = "stl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Display polyhedron metrics for an STL file
    Info {
        /// Input STL file
        input: PathBuf,

        /// Compute the surface area across this many worker threads
        #[arg(long)]
        workers: Option<usize>,
    },

    /// List faces ranked by area
    Rank {
        /// Input STL file
        input: PathBuf,

        /// Number of faces to show
        #[arg(long, short, default_value = "10")]
        count: usize,

        /// Show the largest faces instead of the smallest
        #[arg(long)]
        largest: bool,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "stl_analysis=info",
            2 => "stl_analysis=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Info { input, workers } => info::run(input, *workers, &cli),
        Commands::Rank {
            input,
            count,
            largest,
        } => rank::run(input, *count, *largest, &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            if let Some(stl_err) = e.downcast_ref::<stl_analysis::StlError>() {
                eprintln!("{}: {}", "Error".red().bold(), stl_err);
                eprintln!("  {}: {}", "Code".cyan(), stl_err.code());
            } else {
                eprintln!("{}: {}", "Error".red().bold(), e);
                for cause in e.chain().skip(1) {
                    eprintln!("  {}: {}", "Caused by".yellow(), cause);
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
