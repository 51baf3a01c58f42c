//! Dry-run comparison between a generated set and the files on disk

use std::fs;

use anyhow::{Context, Result};
use micro_gen::templates::README_KEY;
use micro_gen::ArtifactSet;
use similar::TextDiff;

use crate::writer::ProjectWriter;

/// Change to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// File does not exist yet
    Added {
        /// Artifact key
        key: String,
    },
    /// File exists with different content
    Modified {
        /// Artifact key
        key: String,
        /// Unified diff, old on-disk text first
        diff: String,
    },
    /// File would be deleted
    Removed {
        /// Artifact key
        key: String,
    },
}

impl FileChange {
    /// Artifact key
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Added { key } | Self::Modified { key, .. } | Self::Removed { key } => key,
        }
    }
}

/// Every change a forced generation would make, sorted by key
///
/// # Errors
///
/// Returns an error if an existing file cannot be read.
pub fn plan(writer: &ProjectWriter, set: &ArtifactSet) -> Result<Vec<FileChange>> {
    let mut changes = Vec::new();

    let readme = set.readme().map(|text| (README_KEY, text));
    let files = set
        .iter()
        .map(|a| (a.key.as_str(), a.text.as_str()))
        .chain(readme);

    for (key, text) in files {
        let path = writer.path_of(key);
        if !path.exists() {
            changes.push(FileChange::Added {
                key: key.to_string(),
            });
            continue;
        }
        let current = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if current != text {
            let diff = TextDiff::from_lines(current.as_str(), text)
                .unified_diff()
                .context_radius(3)
                .header(&format!("a/{key}"), &format!("b/{key}"))
                .to_string();
            changes.push(FileChange::Modified {
                key: key.to_string(),
                diff,
            });
        }
    }

    for key in set.removed() {
        if writer.path_of(key).exists() {
            changes.push(FileChange::Removed { key: key.clone() });
        }
    }

    changes.sort_by(|a, b| a.key().cmp(b.key()));
    Ok(changes)
}
