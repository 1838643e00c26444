//! Gantry CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "gantry")]
#[command(about = "Declarative resource-graph stack toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Stack root path (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the declared stack and report every violation
    Validate,
    /// Compute and print the apply order, waves, and outputs
    Plan,
    /// Write the synthesized stack document to .gantry/
    Synth,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "gantry={}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Gantry v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Stack root: {}", cli.root.display());

    match cli.command {
        Commands::Validate => commands::validate(cli.root),
        Commands::Plan => commands::plan(cli.root),
        Commands::Synth => commands::synth(cli.root),
        Commands::Version => {
            println!("Gantry v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
