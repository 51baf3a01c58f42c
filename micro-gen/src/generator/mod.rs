//! Project generator orchestrator
//!
//! Turns a [`MetadataGraph`] and a [`TemplateStore`] into an
//! [`ArtifactSet`]: every file of the project, keyed by relative path and
//! tagged with its regeneration policy. Nothing is written here; the whole
//! set is built and formatted in memory first, so a failure anywhere aborts
//! the run before any file is touched.
//!
//! The generator emits:
//! - entry point and configuration files
//! - constant and type definitions
//! - router registrations and handler files
//! - temporary logic stubs
//! - SDK wrappers and their usage snippets
//! - one model file per model
//! - the README, on request

use std::collections::BTreeMap;

use crate::config::MicroGenConfig;
use crate::error::{GenError, Result};
use crate::format::{NoopFormatter, SourceFormatter};
use crate::helpers::NameHelpers;
use crate::metadata::{HandlerKind, MetadataGraph};
use crate::readme::ReadmeAssembler;
use crate::sql::SqlSynthesizer;
use crate::substitute::{self, Substitution};
use crate::templates::{banner_for, policy_for, RegenerationPolicy, TemplateStore};

pub mod definitions;
pub mod handlers;
pub mod models;

pub use handlers::HandlerSymbols;
pub use models::{ModelContext, ModelRenderer};

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Relative path
    pub key: String,
    /// Final text, banner included
    pub text: String,
    /// How an existing file is treated
    pub policy: RegenerationPolicy,
}

/// Everything one run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: BTreeMap<String, Artifact>,
    removed: Vec<String>,
    readme: Option<String>,
}

impl ArtifactSet {
    /// Add an artifact, replacing any previous one with the same key
    pub fn insert(&mut self, artifact: Artifact) {
        self.artifacts.insert(artifact.key.clone(), artifact);
    }

    /// Mark a key as stale: the file writer deletes it
    pub fn remove(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.artifacts.remove(&key);
        if !self.removed.contains(&key) {
            self.removed.push(key);
        }
    }

    /// Artifact by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Artifact> {
        self.artifacts.get(key)
    }

    /// Whether a key is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.artifacts.contains_key(key)
    }

    /// Artifacts sorted by key
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    /// Keys sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.artifacts.keys().map(String::as_str)
    }

    /// Keys whose files must be deleted
    #[must_use]
    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    /// README text, when documentation was requested
    #[must_use]
    pub fn readme(&self) -> Option<&str> {
        self.readme.as_deref()
    }

    /// Number of artifacts
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether no artifact was produced
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Per-run switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Also assemble README.md
    pub readme: bool,
}

/// Project name and import prefix after config fallbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    /// Project identifier
    pub name: String,
    /// Import path prefix
    pub import_prefix: String,
}

impl ProjectIdentity {
    /// Resolve from the metadata, falling back to the configuration
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Metadata`] when neither source names the project.
    pub fn resolve(graph: &MetadataGraph, config: &MicroGenConfig) -> Result<Self> {
        let pick = |primary: &str, fallback: &str| {
            let primary = primary.trim();
            if primary.is_empty() {
                fallback.trim().to_string()
            } else {
                primary.to_string()
            }
        };

        let name = pick(&graph.project.name, &config.project.name);
        if name.is_empty() {
            return Err(GenError::Metadata(
                "project name missing from metadata and configuration".to_string(),
            ));
        }

        let mut import_prefix = pick(&graph.project.import_prefix, &config.project.import_prefix);
        if import_prefix.is_empty() {
            import_prefix = NameHelpers::to_snake_case(&name);
        }

        Ok(Self { name, import_prefix })
    }

    /// Snake-cased root URI segment
    #[must_use]
    pub fn service_api_prefix(&self) -> String {
        NameHelpers::to_snake_case(&self.name)
    }
}

/// Project generator
pub struct ProjectGenerator<'a> {
    graph: &'a MetadataGraph,
    templates: TemplateStore,
    config: MicroGenConfig,
    formatter: Box<dyn SourceFormatter + 'a>,
}

impl std::fmt::Debug for ProjectGenerator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectGenerator")
            .field("templates", &self.templates)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> ProjectGenerator<'a> {
    /// Create a generator with default configuration and no formatting
    #[must_use]
    pub fn new(graph: &'a MetadataGraph, templates: TemplateStore) -> Self {
        Self {
            graph,
            templates,
            config: MicroGenConfig::default(),
            formatter: Box::new(NoopFormatter),
        }
    }

    /// Use a configuration
    #[must_use]
    pub fn with_config(mut self, config: MicroGenConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a formatter for every artifact
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl SourceFormatter + 'a) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Generate every artifact
    ///
    /// # Errors
    ///
    /// Returns the first template, SQL, render or format error; no partial
    /// set is returned.
    pub fn generate(&self, options: GenerateOptions) -> Result<ArtifactSet> {
        let identity = ProjectIdentity::resolve(self.graph, &self.config)?;
        let symbols: Vec<HandlerSymbols> = self
            .graph
            .handlers
            .iter()
            .map(|h| HandlerSymbols::new(h, &identity.name))
            .collect();

        tracing::info!(
            project = %identity.name,
            handlers = symbols.len(),
            models = self.graph.models.len(),
            types = self.graph.types.len(),
            "Generating project"
        );

        let mut set = ArtifactSet::default();

        for key in self.templates.keys() {
            let mut text = Substitution::new(key, self.templates.get(key)?);
            text.replace_optional(substitute::IMPORT_PREFIX, &identity.import_prefix);
            if self.fill(key, &mut text, &identity, &symbols)? {
                set.insert(self.finish(key, text.into_text())?);
            } else {
                tracing::debug!(artifact = %key, "No handlers of this kind, removing artifact");
                set.remove(key);
            }
        }

        let renderer = ModelRenderer::new(&self.templates)?;
        let sql = SqlSynthesizer::new(&self.config.sql);
        for model in &self.graph.models {
            let key = ModelRenderer::key(model);
            let mut text = Substitution::new(&key, renderer.render(model, &sql)?);
            text.replace_optional(substitute::IMPORT_PREFIX, &identity.import_prefix);
            set.insert(self.finish(&key, text.into_text())?);
        }

        if options.readme {
            set.readme = Some(self.readme_for(&identity)?);
        }

        tracing::info!(
            artifacts = set.len(),
            removed = set.removed().len(),
            "Generated project"
        );
        Ok(set)
    }

    /// Assemble README.md only
    ///
    /// # Errors
    ///
    /// Returns an error if the project identity cannot be resolved or the
    /// README template lacks its placeholder.
    pub fn readme(&self) -> Result<String> {
        let identity = ProjectIdentity::resolve(self.graph, &self.config)?;
        self.readme_for(&identity)
    }

    fn readme_for(&self, identity: &ProjectIdentity) -> Result<String> {
        ReadmeAssembler::new(self.graph, &identity.name).assemble(self.templates.readme())
    }

    /// Fill the placeholders of one template; `false` drops the artifact
    fn fill(
        &self,
        key: &str,
        text: &mut Substitution,
        identity: &ProjectIdentity,
        symbols: &[HandlerSymbols],
    ) -> Result<bool> {
        let graph = self.graph;
        match key {
            "main.go" | "config.go" => {
                text.replace(substitute::SERVICE_API_PREFIX, &identity.service_api_prefix())?;
            }
            "args/const.gen.go" => {
                text.replace_with_line(substitute::CONST_LIST, &definitions::const_list(graph))?;
            }
            "args/type.gen.go" => {
                text.replace_with_line(substitute::IMPORT_LIST, &definitions::import_list(graph))?
                    .replace_with_line(
                        substitute::TYPE_DEFINE_LIST,
                        &definitions::type_define_list(graph),
                    )?;
            }
            "api/router.gen.go" => {
                text.replace_with_line(
                    substitute::REGISTER_ROUTER_LIST,
                    &handlers::register_router_list(symbols),
                )?;
            }
            "api/pull_handler.gen.go" | "api/push_handler.gen.go" => {
                let kind = if key == "api/pull_handler.gen.go" {
                    HandlerKind::Pull
                } else {
                    HandlerKind::Push
                };
                if !symbols.iter().any(|s| s.kind == kind) {
                    return Ok(false);
                }
                text.replace_with_line(
                    substitute::HANDLER_API_DEFINE,
                    &handlers::handler_api_define(symbols, kind),
                )?;
            }
            "logic/tmp_code.gen.go" => {
                text.replace_with_line(
                    substitute::LOGIC_API_DEFINE,
                    &handlers::logic_api_define(symbols),
                )?;
            }
            "sdk/rpc.gen.go" => {
                text.replace_with_line(
                    substitute::RPC_CALL_DEFINE,
                    &handlers::rpc_call_define(symbols),
                )?;
            }
            "sdk/rpc.gen_test.go" => {
                text.replace_with_line(
                    substitute::RPC_CALL_TEST_DEFINE,
                    &handlers::rpc_call_test_define(symbols),
                )?;
            }
            _ => {}
        }
        Ok(true)
    }

    /// Prepend the banner and run the formatter
    fn finish(&self, key: &str, body: String) -> Result<Artifact> {
        let banner = banner_for(key).render(&self.config.output.banner_tool);
        let text = self.formatter.format(key, &(banner + &body))?;
        tracing::debug!(artifact = %key, bytes = text.len(), "Generated artifact");
        Ok(Artifact {
            key: key.to_string(),
            text,
            policy: policy_for(key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        FieldDescriptor, HandlerDescriptor, HandlerGroup, ModelDescriptor, ProjectInfo,
        TypeDescriptor, TypeTable,
    };

    fn graph() -> MetadataGraph {
        MetadataGraph {
            project: ProjectInfo {
                name: "Demo".to_string(),
                import_prefix: "github.com/acme/demo".to_string(),
                doc: "// Demo service\n".to_string(),
            },
            handlers: vec![HandlerDescriptor {
                full_name: "Home".to_string(),
                uri: "/home".to_string(),
                arg_type: "HomeArg".to_string(),
                result_type: "HomeResult".to_string(),
                group: HandlerGroup::default(),
                ..HandlerDescriptor::default()
            }],
            models: vec![ModelDescriptor {
                name: "User".to_string(),
                fields: vec![
                    FieldDescriptor {
                        name: "Id".to_string(),
                        type_tag: "int64".to_string(),
                        is_primary: true,
                        ..FieldDescriptor::default()
                    },
                    FieldDescriptor {
                        name: "Name".to_string(),
                        type_tag: "string".to_string(),
                        ..FieldDescriptor::default()
                    },
                ],
                ..ModelDescriptor::default()
            }],
            types: TypeTable::new(vec![TypeDescriptor {
                name: "HomeArg".to_string(),
                ..TypeDescriptor::default()
            }]),
            imports: Vec::new(),
        }
    }

    struct FailingFormatter;

    impl SourceFormatter for FailingFormatter {
        fn format(&self, key: &str, source: &str) -> Result<String> {
            Err(GenError::Format {
                key: key.to_string(),
                message: "expected declaration".to_string(),
                source_text: source.to_string(),
            })
        }
    }

    #[test]
    fn test_identity_fallbacks() {
        let mut g = graph();
        g.project = ProjectInfo::default();
        let mut config = MicroGenConfig::default();
        assert!(ProjectIdentity::resolve(&g, &config).is_err());

        config.project.name = "MyService".to_string();
        let identity = ProjectIdentity::resolve(&g, &config).unwrap();
        assert_eq!(identity.import_prefix, "my_service");
        assert_eq!(identity.service_api_prefix(), "my_service");
    }

    #[test]
    fn test_generate_without_push_handlers() {
        let g = graph();
        let set = ProjectGenerator::new(&g, TemplateStore::builtin())
            .generate(GenerateOptions::default())
            .unwrap();

        assert!(set.contains("api/pull_handler.gen.go"));
        assert!(!set.contains("api/push_handler.gen.go"));
        assert_eq!(set.removed(), ["api/push_handler.gen.go".to_string()]);
        assert!(set.contains("logic/model/mysql_user.gen.go"));
        assert!(set.readme().is_none());
    }

    #[test]
    fn test_banners_follow_policy() {
        let g = graph();
        let set = ProjectGenerator::new(&g, TemplateStore::builtin())
            .generate(GenerateOptions::default())
            .unwrap();

        let main = set.get("main.go").unwrap();
        assert_eq!(main.policy, RegenerationPolicy::ScaffoldOnce);
        assert!(main.text.starts_with("package main"));
        assert!(main.text.contains("\"github.com/acme/demo/api\""));
        assert!(main.text.contains("api.Route(\"/demo\", srv.Router())"));

        let router = set.get("api/router.gen.go").unwrap();
        assert!(router
            .text
            .starts_with("// Code generated by 'micro gen' command.\n// DO NOT EDIT!\n\n"));

        let tmp = set.get("logic/tmp_code.gen.go").unwrap();
        assert!(tmp.text.contains("// The temporary code used to ensure successful compilation!"));
    }

    #[test]
    fn test_banner_tool_from_config() {
        let g = graph();
        let mut config = MicroGenConfig::default();
        config.output.banner_tool = "micro-gen".to_string();
        let set = ProjectGenerator::new(&g, TemplateStore::builtin())
            .with_config(config)
            .generate(GenerateOptions::default())
            .unwrap();
        assert!(set
            .get("sdk/rpc.gen.go")
            .unwrap()
            .text
            .starts_with("// Code generated by 'micro-gen' command."));
    }

    #[test]
    fn test_no_placeholder_left() {
        let g = graph();
        let set = ProjectGenerator::new(&g, TemplateStore::builtin())
            .generate(GenerateOptions { readme: true })
            .unwrap();
        for artifact in set.iter() {
            assert!(!artifact.text.contains("${"), "{}", artifact.key);
        }
        assert!(!set.readme().unwrap().contains("${"));
    }

    #[test]
    fn test_format_error_aborts() {
        let g = graph();
        let err = ProjectGenerator::new(&g, TemplateStore::builtin())
            .with_formatter(FailingFormatter)
            .generate(GenerateOptions::default())
            .unwrap_err();
        assert!(matches!(err, GenError::Format { .. }));
    }

    #[test]
    fn test_empty_model_aborts() {
        let mut g = graph();
        g.models[0].fields.truncate(1);
        let err = ProjectGenerator::new(&g, TemplateStore::builtin())
            .generate(GenerateOptions::default())
            .unwrap_err();
        assert!(matches!(err, GenError::EmptyFragment { .. }));
    }

    #[test]
    fn test_artifact_set_remove() {
        let mut set = ArtifactSet::default();
        set.insert(Artifact {
            key: "a.go".to_string(),
            text: String::new(),
            policy: RegenerationPolicy::AlwaysOverwrite,
        });
        set.remove("a.go");
        set.remove("a.go");
        assert!(set.is_empty());
        assert_eq!(set.removed().len(), 1);
    }
}
