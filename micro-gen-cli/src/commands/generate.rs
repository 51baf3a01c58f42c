//! `micro-gen gen`: generate the project

use anyhow::Result;
use clap::Args;
use console::style;
use micro_gen::GenerateOptions;
use micro_gen_cli::{ProjectWriter, WriteReport};

use super::{spinner, ProjectArgs};

/// Generate or refresh a tp-micro project
#[derive(Debug, Clone, Args)]
pub struct GenCommand {
    #[command(flatten)]
    project: ProjectArgs,

    /// Overwrite scaffold-once files as well
    #[arg(short, long)]
    force: bool,

    /// Regenerate README.md
    #[arg(long)]
    newdoc: bool,

    /// Skip gofmt
    #[arg(long)]
    no_format: bool,
}

impl GenCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs cannot be loaded, generation fails or
    /// a file cannot be written. Generation errors leave the disk untouched.
    pub fn execute(&self) -> Result<()> {
        let session = self.project.open()?;

        println!(
            "{} {} {}",
            style("Generating").green().bold(),
            style("project in").bold(),
            style(session.root.display()).cyan().bold()
        );
        println!();

        let progress = spinner("Synthesizing artifacts...")?;
        let options = GenerateOptions {
            readme: self.newdoc,
        };
        let set = match session.generate(options, !self.no_format) {
            Ok(set) => set,
            Err(e) => {
                progress.finish_and_clear();
                return Err(e);
            }
        };

        progress.set_message("Writing files...");
        let writer = ProjectWriter::new(&session.root).force(self.force);
        let report = writer.write(&set);
        progress.finish_and_clear();

        print_report(&report?);
        Ok(())
    }
}

fn print_report(report: &WriteReport) {
    if report.changed() == 0 {
        println!(
            "{} {} kept, nothing to write",
            style("✓ Up to date:").green().bold(),
            report.skipped.len()
        );
        return;
    }
    for key in &report.written {
        println!("  {} {}", style("write").green(), key);
    }
    for key in &report.skipped {
        println!("  {} {} {}", style("keep").yellow(), key, style("(exists)").dim());
    }
    for key in &report.removed {
        println!("  {} {}", style("remove").red(), key);
    }
    println!();
    println!(
        "{} {} written, {} kept, {} removed",
        style("✓ Done:").green().bold(),
        report.written.len(),
        report.skipped.len(),
        report.removed.len()
    );
}
