//! Folio CLI - Documentation site manifest toolkit.
//!
//! Provides commands for:
//! - `check`: Validate the site declaration and its internal links
//! - `export`: Write the resolved manifest as JSON
//! - `mirror`: Derive locale content from another locale

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ExportArgs, MirrorArgs};
use output::Output;

/// Folio - Documentation site manifest toolkit.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable verbose output (info level logging).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the site declaration and check internal links.
    Check(CheckArgs),
    /// Write the resolved site manifest as JSON.
    Export(ExportArgs),
    /// Run configured locale mirror jobs.
    Mirror(MirrorArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::Mirror(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
