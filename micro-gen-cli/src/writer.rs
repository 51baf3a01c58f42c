//! Artifact persistence
//!
//! Applies each artifact's regeneration policy while writing an
//! [`ArtifactSet`] below a project root:
//! - scaffold-once files that already exist are kept unless forced
//! - stale artifacts listed by the generator are deleted
//! - README.md is written only when the set carries one

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use micro_gen::templates::README_KEY;
use micro_gen::{Artifact, ArtifactSet, RegenerationPolicy};

/// What a write pass did, by artifact key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Files created or overwritten
    pub written: Vec<String>,
    /// Scaffold-once files left untouched
    pub skipped: Vec<String>,
    /// Stale files deleted
    pub removed: Vec<String>,
}

impl WriteReport {
    /// Total number of files touched
    #[must_use]
    pub fn changed(&self) -> usize {
        self.written.len() + self.removed.len()
    }
}

/// Writes artifact sets into a project directory
#[derive(Debug, Clone)]
pub struct ProjectWriter {
    root: PathBuf,
    force: bool,
}

impl ProjectWriter {
    /// Writer rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            force: false,
        }
    }

    /// Overwrite scaffold-once files too
    #[must_use]
    pub const fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Project root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of an artifact key
    #[must_use]
    pub fn path_of(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Whether an artifact would be written
    #[must_use]
    pub fn should_write(&self, artifact: &Artifact) -> bool {
        match artifact.policy {
            RegenerationPolicy::AlwaysOverwrite => true,
            RegenerationPolicy::ScaffoldOnce => {
                self.force || !self.path_of(&artifact.key).exists()
            }
        }
    }

    /// Persist a whole set
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or a file cannot be
    /// written or removed.
    pub fn write(&self, set: &ArtifactSet) -> Result<WriteReport> {
        let mut report = WriteReport::default();

        for artifact in set.iter() {
            if !self.should_write(artifact) {
                tracing::warn!(artifact = %artifact.key, "Keeping existing scaffold-once file (use --force to overwrite)");
                report.skipped.push(artifact.key.clone());
                continue;
            }
            self.write_file(&artifact.key, &artifact.text)?;
            report.written.push(artifact.key.clone());
        }

        for key in set.removed() {
            let path = self.path_of(key);
            if path.exists() {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                tracing::info!(artifact = %key, "Removed stale artifact");
                report.removed.push(key.clone());
            }
        }

        if let Some(readme) = set.readme() {
            self.write_file(README_KEY, readme)?;
            report.written.push(README_KEY.to_string());
        }

        Ok(report)
    }

    /// Write one file, creating its parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the file cannot be written.
    pub fn write_file(&self, key: &str, text: &str) -> Result<()> {
        let path = self.path_of(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(artifact = %key, path = %path.display(), "Wrote artifact");
        Ok(())
    }
}
