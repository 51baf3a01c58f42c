//! `micro-gen diff`: show what `gen --force` would change

use anyhow::Result;
use clap::Args;
use console::style;
use micro_gen::GenerateOptions;
use micro_gen_cli::{diff, FileChange, ProjectWriter};

use super::{spinner, ProjectArgs};

/// Compare generated output with the files on disk
#[derive(Debug, Clone, Args)]
pub struct DiffCommand {
    #[command(flatten)]
    project: ProjectArgs,

    /// Include README.md
    #[arg(long)]
    newdoc: bool,

    /// Skip gofmt
    #[arg(long)]
    no_format: bool,
}

impl DiffCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs cannot be loaded, generation fails or
    /// an existing file cannot be read.
    pub fn execute(&self) -> Result<()> {
        let session = self.project.open()?;

        let progress = spinner("Synthesizing artifacts...")?;
        let set = session.generate(
            GenerateOptions {
                readme: self.newdoc,
            },
            !self.no_format,
        );
        progress.finish_and_clear();

        let writer = ProjectWriter::new(&session.root).force(true);
        let changes = diff::plan(&writer, &set?)?;

        if changes.is_empty() {
            println!("{}", style("✓ Up to date").green().bold());
            return Ok(());
        }

        for change in &changes {
            match change {
                FileChange::Added { key } => println!("{} {key}", style("added").green().bold()),
                FileChange::Removed { key } => println!("{} {key}", style("removed").red().bold()),
                FileChange::Modified { key, diff } => {
                    println!("{} {key}", style("modified").yellow().bold());
                    print_diff(diff);
                }
            }
        }
        println!();
        println!("{} file(s) would change", changes.len());
        Ok(())
    }
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", style(line).bold());
        } else if line.starts_with('+') {
            println!("{}", style(line).green());
        } else if line.starts_with('-') {
            println!("{}", style(line).red());
        } else if line.starts_with("@@") {
            println!("{}", style(line).cyan());
        } else {
            println!("{line}");
        }
    }
}
