//! micro-gen: project synthesis engine for tp-micro services
//!
//! Turns one metadata description of a service's RPC handlers and persisted
//! models into a coherent set of Go sources: router registrations, handler
//! and logic stubs, SDK wrappers, model access code and an annotated README.
//!
//! The engine is a pure function from ([`MetadataGraph`], [`TemplateStore`])
//! to [`ArtifactSet`]. Persisting the set is left to the caller.
//!
//! # Quick Start
//!
//! ```rust
//! use micro_gen::prelude::*;
//!
//! let graph = MetadataGraph::from_json_str(r#"{
//!     "project": { "name": "Demo", "importPrefix": "github.com/acme/demo" },
//!     "handlers": [{
//!         "fullName": "Home",
//!         "uri": "/home",
//!         "argType": "HomeArg",
//!         "resultType": "HomeResult",
//!         "group": { "kind": "pull" }
//!     }]
//! }"#)?;
//!
//! let set = ProjectGenerator::new(&graph, TemplateStore::builtin())
//!     .generate(GenerateOptions::default())?;
//!
//! assert!(set.contains("api/pull_handler.gen.go"));
//! assert!(!set.contains("api/push_handler.gen.go"));
//! # Ok::<(), micro_gen::GenError>(())
//! ```
//!
//! # Components
//!
//! - [`templates`]: template store and regeneration policy table
//! - [`substitute`]: `${placeholder}` substitution
//! - [`schema`]: example payload synthesis with per-field annotations
//! - [`sql`]: SQL fragment synthesis
//! - [`generator`]: artifact orchestration
//! - [`readme`]: README assembly

pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod helpers;
pub mod metadata;
pub mod readme;
pub mod schema;
pub mod sql;
pub mod substitute;
pub mod templates;

pub use config::MicroGenConfig;
pub use error::{GenError, Result};
pub use format::{NoopFormatter, SourceFormatter};
pub use generator::{Artifact, ArtifactSet, GenerateOptions, ProjectGenerator};
pub use metadata::MetadataGraph;
pub use templates::{RegenerationPolicy, TemplateStore};

pub mod prelude {
    //! Convenience re-exports for common types and traits

    pub use crate::config::MicroGenConfig;
    pub use crate::error::{GenError, Result};
    pub use crate::format::{NoopFormatter, SourceFormatter};
    pub use crate::generator::{
        Artifact, ArtifactSet, GenerateOptions, ProjectGenerator, ProjectIdentity,
    };
    pub use crate::metadata::{
        FieldDescriptor, HandlerDescriptor, HandlerKind, MetadataGraph, ModelDescriptor,
        ModelStyle, TypeDescriptor, TypeTable,
    };
    pub use crate::readme::ReadmeAssembler;
    pub use crate::schema::SchemaSynthesizer;
    pub use crate::sql::{SqlFragments, SqlSynthesizer};
    pub use crate::templates::{RegenerationPolicy, TemplateStore};
}
