//! Metadata graph: the immutable input of a generation run
//!
//! The graph is produced by a source parser (outside this crate) and handed
//! over as a JSON or TOML document. It describes:
//! - RPC handlers, partitioned into pull (request/response) and push
//!   (fire-and-forget) kinds
//! - persisted models, bound to a relational or document storage style
//! - the type table used to resolve nested field types
//!
//! # Example document
//!
//! ```json
//! {
//!   "project": { "name": "Demo", "importPrefix": "github.com/acme/demo" },
//!   "handlers": [{
//!     "fullName": "Math_Divide",
//!     "uri": "/math/divide",
//!     "doc": "// Divide divides two numbers\n",
//!     "argType": "DivideArg",
//!     "resultType": "DivideResult",
//!     "group": { "name": "Math", "kind": "pull" }
//!   }],
//!   "types": [{ "name": "DivideArg", "fields": [
//!     { "name": "A", "type": "float64", "comment": "// dividend" }
//!   ]}]
//! }
//! ```

mod field_type;

pub use field_type::{uses_time, FieldKind, TIME_TYPE};

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::helpers::NameHelpers;

/// Handler kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Request/response handler
    #[default]
    Pull,
    /// Fire-and-forget handler
    Push,
}

/// Group a handler was declared in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerGroup {
    /// Group name, empty for top-level handlers
    pub name: String,
    /// Kind shared by every handler in the group
    pub kind: HandlerKind,
}

/// One RPC endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandlerDescriptor {
    /// Unique Go symbol for the handler
    pub full_name: String,
    /// URI suffix below the project root segment
    pub uri: String,
    /// Raw comment text
    pub doc: String,
    /// Argument type name
    pub arg_type: String,
    /// Result type name (ignored for push handlers)
    pub result_type: String,
    /// Declaring group
    pub group: HandlerGroup,
}

impl HandlerDescriptor {
    /// Handler kind, taken from its group
    #[must_use]
    pub const fn kind(&self) -> HandlerKind {
        self.group.kind
    }
}

/// One field of a type or model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Go field name
    pub name: String,
    /// Storage column / JSON key, empty when not declared
    pub model_name: String,
    /// Go type expression
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Doc comment above the field
    pub doc: String,
    /// Trailing line comment
    pub comment: String,
    /// Part of the primary key
    pub is_primary: bool,
    /// Carries a unique constraint
    pub is_unique: bool,
}

impl FieldDescriptor {
    /// Column / JSON key: `model_name`, or the snake-cased field name
    #[must_use]
    pub fn column_name(&self) -> String {
        if self.model_name.is_empty() {
            NameHelpers::to_snake_case(&self.name)
        } else {
            self.model_name.clone()
        }
    }

    /// Classified type
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        FieldKind::parse(&self.type_tag)
    }
}

/// Storage style of a model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStyle {
    /// Relational store (`MySQL`)
    #[default]
    #[serde(alias = "mysql")]
    Relational,
    /// Document store (`MongoDB`)
    #[serde(alias = "mongo")]
    Document,
}

impl ModelStyle {
    /// File name prefix of model artifacts
    #[must_use]
    pub const fn file_prefix(self) -> &'static str {
        match self {
            Self::Relational => "mysql",
            Self::Document => "mongo",
        }
    }
}

/// One persisted model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Go type name
    pub name: String,
    /// Storage style
    pub style: ModelStyle,
    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
    /// Primary key field names; derived from `is_primary` when empty
    pub primary_fields: Vec<String>,
    /// Unique field names; derived from `is_unique` when empty
    pub unique_fields: Vec<String>,
    /// No primary key was declared and a default one was synthesized
    pub is_default_primary: bool,
    /// Raw comment text
    pub doc: String,
}

impl ModelDescriptor {
    /// Primary key fields, in declaration order
    #[must_use]
    pub fn primary(&self) -> Vec<&FieldDescriptor> {
        self.select(&self.primary_fields, |f| f.is_primary)
    }

    /// Unique fields, in declaration order
    #[must_use]
    pub fn unique(&self) -> Vec<&FieldDescriptor> {
        self.select(&self.unique_fields, |f| f.is_unique)
    }

    fn select<'a>(
        &'a self,
        names: &[String],
        flag: impl Fn(&FieldDescriptor) -> bool,
    ) -> Vec<&'a FieldDescriptor> {
        if names.is_empty() {
            return self.fields.iter().filter(|f| flag(f)).collect();
        }
        self.fields
            .iter()
            .filter(|f| names.iter().any(|n| *n == f.name || *n == f.column_name()))
            .collect()
    }
}

/// A named struct type and its fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDescriptor {
    /// Go type name
    pub name: String,
    /// Raw comment text
    pub doc: String,
    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

/// Ordered type table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TypeDescriptor>", into = "Vec<TypeDescriptor>")]
pub struct TypeTable {
    types: Vec<TypeDescriptor>,
    index: HashMap<String, usize>,
}

impl TypeTable {
    /// Build a table; later duplicates shadow earlier ones in lookups
    #[must_use]
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        let index = types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();
        Self { types, index }
    }

    /// Look a type up by name, falling back to the unqualified name
    /// (`args.Item` resolves `Item`)
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        let name = name.trim_start_matches('*');
        self.index
            .get(name)
            .or_else(|| {
                name.rsplit_once('.')
                    .and_then(|(_, short)| self.index.get(short))
            })
            .map(|&i| &self.types[i])
    }

    /// Field list of a type
    #[must_use]
    pub fn fields(&self, name: &str) -> Option<&[FieldDescriptor]> {
        self.get(name).map(|t| t.fields.as_slice())
    }

    /// Types in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter()
    }

    /// Number of types
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl From<Vec<TypeDescriptor>> for TypeTable {
    fn from(types: Vec<TypeDescriptor>) -> Self {
        Self::new(types)
    }
}

impl From<TypeTable> for Vec<TypeDescriptor> {
    fn from(table: TypeTable) -> Self {
        table.types
    }
}

/// Project identity as reported by the parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectInfo {
    /// Project identifier
    pub name: String,
    /// Import path prefix of the generated packages
    pub import_prefix: String,
    /// Project level comment text
    pub doc: String,
}

/// The whole metadata graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataGraph {
    /// Project identity
    pub project: ProjectInfo,
    /// Handlers in declaration order
    pub handlers: Vec<HandlerDescriptor>,
    /// Models in declaration order
    pub models: Vec<ModelDescriptor>,
    /// Type table
    pub types: TypeTable,
    /// Imports collected for the type definition file
    pub imports: Vec<String>,
}

impl MetadataGraph {
    /// Load a metadata document, choosing the decoder from the extension
    /// (`.toml`, anything else is read as JSON)
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or if the
    /// graph violates the handler name uniqueness invariant.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }

    /// Decode a JSON metadata document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or invalid.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let graph: Self =
            serde_json::from_str(text).map_err(|e| GenError::Metadata(e.to_string()))?;
        graph.validate()?;
        Ok(graph)
    }

    /// Decode a TOML metadata document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or invalid.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let graph: Self = toml::from_str(text).map_err(|e| GenError::Metadata(e.to_string()))?;
        graph.validate()?;
        Ok(graph)
    }

    /// Check the graph invariants
    ///
    /// # Errors
    ///
    /// Returns [`GenError::DuplicateHandler`] when two handlers share a full name.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for handler in &self.handlers {
            if !seen.insert(handler.full_name.as_str()) {
                return Err(GenError::DuplicateHandler {
                    name: handler.full_name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Handlers of one kind, in declaration order
    pub fn handlers_of(&self, kind: HandlerKind) -> impl Iterator<Item = &HandlerDescriptor> {
        self.handlers.iter().filter(move |h| h.kind() == kind)
    }

    /// Models of one storage style, in declaration order
    pub fn models_of(&self, style: ModelStyle) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter().filter(move |m| m.style == style)
    }
}
