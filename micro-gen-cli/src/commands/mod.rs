//! CLI command implementations

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use micro_gen_cli::ProjectSession;

pub mod diff;
pub mod generate;
pub mod readme;

pub use diff::DiffCommand;
pub use generate::GenCommand;
pub use readme::ReadmeCommand;

/// Arguments shared by every command
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Metadata document (`.json` or `.toml`)
    #[arg(value_name = "METADATA")]
    pub metadata: PathBuf,

    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file (default: `<DIR>/micro-gen.toml`)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ProjectArgs {
    /// Load the run inputs
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata, configuration or templates cannot
    /// be loaded.
    pub fn open(&self) -> Result<ProjectSession> {
        ProjectSession::open(&self.metadata, &self.dir, self.config.as_deref())
    }
}

/// Spinner shown while a step runs
fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Failed to set progress style")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message);
    Ok(spinner)
}
