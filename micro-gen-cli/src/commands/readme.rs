//! `micro-gen readme`: regenerate README.md only

use anyhow::Result;
use clap::Args;
use console::style;
use micro_gen::templates::README_KEY;
use micro_gen_cli::ProjectWriter;

use super::ProjectArgs;

/// Rebuild the API documentation
#[derive(Debug, Clone, Args)]
pub struct ReadmeCommand {
    #[command(flatten)]
    project: ProjectArgs,
}

impl ReadmeCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs cannot be loaded or README.md cannot
    /// be written.
    pub fn execute(&self) -> Result<()> {
        let session = self.project.open()?;
        let text = session.readme()?;

        let writer = ProjectWriter::new(&session.root);
        writer.write_file(README_KEY, &text)?;

        println!(
            "{} {}",
            style("✓ Generated").green().bold(),
            style(writer.path_of(README_KEY).display()).cyan()
        );
        Ok(())
    }
}
