//! micro-gen CLI tool

#![allow(clippy::multiple_crate_versions)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{DiffCommand, GenCommand, ReadmeCommand};
use micro_gen_cli::observability;

#[derive(Parser)]
#[command(name = "micro-gen")]
#[command(version)]
#[command(about = "Generate tp-micro service projects from handler and model metadata", long_about = None)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate or refresh the project
    Gen(GenCommand),
    /// Show what a forced generation would change
    Diff(DiffCommand),
    /// Regenerate README.md only
    Readme(ReadmeCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    match cli.command {
        Commands::Gen(cmd) => cmd.execute()?,
        Commands::Diff(cmd) => cmd.execute()?,
        Commands::Readme(cmd) => cmd.execute()?,
    }

    Ok(())
}
