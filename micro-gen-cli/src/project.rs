//! Inputs of one CLI run: metadata, configuration and templates

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use micro_gen::config::LOCAL_CONFIG_FILE;
use micro_gen::{
    ArtifactSet, GenerateOptions, MetadataGraph, MicroGenConfig, NoopFormatter,
    ProjectGenerator, SourceFormatter, TemplateStore,
};

use crate::gofmt::GofmtFormatter;

/// Everything a command needs to run the generator
#[derive(Debug)]
pub struct ProjectSession {
    /// Parsed metadata document
    pub graph: MetadataGraph,
    /// Effective configuration
    pub config: MicroGenConfig,
    /// Templates with overrides applied
    pub templates: TemplateStore,
    /// Project root
    pub root: PathBuf,
}

impl ProjectSession {
    /// Load the metadata document, the configuration and the templates
    ///
    /// Without an explicit configuration file, `micro-gen.toml` in the
    /// project root is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if any input cannot be read or decoded.
    pub fn open(metadata: &Path, root: &Path, config: Option<&Path>) -> Result<Self> {
        let local = root.join(LOCAL_CONFIG_FILE);
        let config_path = config.or_else(|| local.exists().then_some(local.as_path()));
        let config = MicroGenConfig::load(config_path).context("Failed to load configuration")?;

        let graph = MetadataGraph::load(metadata)
            .with_context(|| format!("Failed to load metadata from {}", metadata.display()))?;

        let templates = match &config.templates.override_dir {
            Some(dir) => {
                let dir = if dir.is_relative() { root.join(dir) } else { dir.clone() };
                TemplateStore::with_overrides(&dir).with_context(|| {
                    format!("Failed to load template overrides from {}", dir.display())
                })?
            }
            None => TemplateStore::builtin(),
        };

        tracing::debug!(
            metadata = %metadata.display(),
            root = %root.display(),
            handlers = graph.handlers.len(),
            models = graph.models.len(),
            "Opened project session"
        );

        Ok(Self {
            graph,
            config,
            templates,
            root: root.to_path_buf(),
        })
    }

    /// Formatter for this run
    ///
    /// Falls back to no formatting when disabled, unconfigured, or when the
    /// configured executable cannot be started.
    #[must_use]
    pub fn formatter(&self, enabled: bool) -> Box<dyn SourceFormatter> {
        let command = self.config.output.formatter.trim();
        if !enabled || command.is_empty() {
            return Box::new(NoopFormatter);
        }
        let gofmt = GofmtFormatter::new(command);
        if gofmt.is_available() {
            Box::new(gofmt)
        } else {
            tracing::warn!(command = %command, "Formatter not found, writing unformatted sources");
            Box::new(NoopFormatter)
        }
    }

    /// Run the generator
    ///
    /// # Errors
    ///
    /// Returns the generator's error; nothing has been written at that point.
    pub fn generate(&self, options: GenerateOptions, format: bool) -> Result<ArtifactSet> {
        let set = ProjectGenerator::new(&self.graph, self.templates.clone())
            .with_config(self.config.clone())
            .with_formatter(self.formatter(format))
            .generate(options)
            .context("Project generation failed")?;
        Ok(set)
    }

    /// Assemble README.md only
    ///
    /// # Errors
    ///
    /// Returns an error if the README cannot be assembled.
    pub fn readme(&self) -> Result<String> {
        let text = ProjectGenerator::new(&self.graph, self.templates.clone())
            .with_config(self.config.clone())
            .readme()
            .context("README assembly failed")?;
        Ok(text)
    }
}
