//! Example payload synthesis
//!
//! Builds an example JSON document from a field list, resolving nested types
//! through the [`TypeTable`], and renders it with per-field annotations.
//!
//! # Rendering
//!
//! Output follows Go's `json.Indent` with a `\t` prefix and `\t` indent, so
//! the text drops straight into an indented markdown code block:
//!
//! ```text
//! {
//! 		"id": -0,	// user id
//! 		"tags": [	// labels
//! 			""
//! 		],
//! 		"owner": {
//! 			"name": ""
//! 		}
//! 	}
//! ```

pub mod annotate;

pub use annotate::{Note, NoteId, NoteTable};

use crate::metadata::{FieldDescriptor, FieldKind, TypeTable};

const PREFIX: &str = "\t";
const INDENT: &str = "\t";

/// One node of a synthesized payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Ordered key/value pairs
    Object(Vec<SchemaEntry>),
    /// Array holding one example element
    Array(Box<SchemaNode>),
    /// Literal scalar value
    Scalar(&'static str),
}

/// One key of an object node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    /// JSON key
    pub key: String,
    /// Documentation of scalar and scalar-array fields
    pub note: Option<NoteId>,
    /// Value
    pub value: SchemaNode,
}

/// Schema synthesizer for one run
///
/// Owns the note arena, so every note id handed out during the run is
/// unique across all payloads it synthesizes.
#[derive(Debug)]
pub struct SchemaSynthesizer<'a> {
    types: &'a TypeTable,
    notes: NoteTable,
    visiting: Vec<String>,
}

impl<'a> SchemaSynthesizer<'a> {
    /// Create a synthesizer over a type table
    #[must_use]
    pub fn new(types: &'a TypeTable) -> Self {
        Self {
            types,
            notes: NoteTable::new(),
            visiting: Vec::new(),
        }
    }

    /// Payload of a named type, `None` when unresolvable or without fields
    pub fn synthesize_type(&mut self, name: &str) -> Option<SchemaNode> {
        let types = self.types;
        let fields = types.fields(name)?;
        self.synthesize(fields)
    }

    /// Payload of a field list, `None` when no field resolves
    ///
    /// Nested objects keep rendering as `{}`; only the top level collapses.
    pub fn synthesize(&mut self, fields: &[FieldDescriptor]) -> Option<SchemaNode> {
        let entries = self.entries(fields);
        if entries.is_empty() {
            return None;
        }
        Some(SchemaNode::Object(entries))
    }

    fn entries(&mut self, fields: &[FieldDescriptor]) -> Vec<SchemaEntry> {
        fields
            .iter()
            .filter_map(|field| {
                let kind = field.kind();
                let Some(value) = self.node(&kind) else {
                    tracing::debug!(
                        field = %field.name,
                        type_tag = %field.type_tag,
                        "Omitting field with unresolvable type from example payload"
                    );
                    return None;
                };
                let note = kind
                    .is_scalar()
                    .then(|| self.notes.insert(&field.doc, &field.comment));
                Some(SchemaEntry {
                    key: field.column_name(),
                    note,
                    value,
                })
            })
            .collect()
    }

    fn node(&mut self, kind: &FieldKind) -> Option<SchemaNode> {
        if let Some(literal) = kind.example_literal() {
            return Some(SchemaNode::Scalar(literal));
        }
        match kind {
            FieldKind::Slice(element) => self.node(element).map(|n| SchemaNode::Array(Box::new(n))),
            FieldKind::Named(name) => self.object(name),
            _ => None,
        }
    }

    fn object(&mut self, name: &str) -> Option<SchemaNode> {
        let types = self.types;
        let descriptor = types.get(name)?;
        // self-referencing types would recurse forever
        if self.visiting.contains(&descriptor.name) {
            return None;
        }
        self.visiting.push(descriptor.name.clone());
        let entries = self.entries(&descriptor.fields);
        self.visiting.pop();
        Some(SchemaNode::Object(entries))
    }

    /// Notes recorded so far
    #[must_use]
    pub const fn notes(&self) -> &NoteTable {
        &self.notes
    }

    /// Indented JSON with annotations after documented values
    #[must_use]
    pub fn render(&self, node: &SchemaNode) -> String {
        Renderer::annotated(&self.notes).finish(node)
    }

    /// Indented JSON with `$<id>` tokens appended to documented keys
    #[must_use]
    pub fn render_tokenized(&self, node: &SchemaNode) -> String {
        Renderer::tokenized().finish(node)
    }
}

struct Renderer<'n> {
    notes: Option<&'n NoteTable>,
    out: String,
}

impl<'n> Renderer<'n> {
    const fn annotated(notes: &'n NoteTable) -> Self {
        Self {
            notes: Some(notes),
            out: String::new(),
        }
    }

    const fn tokenized() -> Self {
        Self {
            notes: None,
            out: String::new(),
        }
    }

    fn finish(mut self, node: &SchemaNode) -> String {
        self.value(node, 0);
        self.out
    }

    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        self.out.push_str(PREFIX);
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }

    fn value(&mut self, node: &SchemaNode, depth: usize) {
        if self.open(node) {
            self.close(node, depth);
        }
    }

    /// Write a scalar or empty container whole, or the opening bracket of a
    /// container; returns whether a body must follow
    fn open(&mut self, node: &SchemaNode) -> bool {
        match node {
            SchemaNode::Scalar(literal) => {
                self.out.push_str(literal);
                false
            }
            SchemaNode::Object(entries) if entries.is_empty() => {
                self.out.push_str("{}");
                false
            }
            SchemaNode::Object(_) => {
                self.out.push('{');
                true
            }
            SchemaNode::Array(_) => {
                self.out.push('[');
                true
            }
        }
    }

    fn close(&mut self, node: &SchemaNode, depth: usize) {
        match node {
            SchemaNode::Object(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    self.entry(entry, depth + 1, i + 1 == entries.len());
                }
                self.newline(depth);
                self.out.push('}');
            }
            SchemaNode::Array(element) => {
                self.newline(depth + 1);
                self.value(element, depth + 1);
                self.newline(depth);
                self.out.push(']');
            }
            SchemaNode::Scalar(_) => {}
        }
    }

    fn entry(&mut self, entry: &SchemaEntry, depth: usize, last: bool) {
        self.newline(depth);
        self.out.push('"');
        self.out.push_str(&entry.key);
        let annotation = match (self.notes, entry.note) {
            (Some(notes), Some(id)) => notes.annotation(id),
            (None, Some(id)) => {
                self.out.push('$');
                self.out.push_str(&id.to_string());
                String::new()
            }
            _ => String::new(),
        };
        self.out.push_str("\": ");

        if self.open(&entry.value) {
            self.out.push_str(&annotation);
            self.close(&entry.value, depth);
            if !last {
                self.out.push(',');
            }
        } else {
            if !last {
                self.out.push(',');
            }
            self.out.push_str(&annotation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TypeDescriptor;

    fn field(name: &str, tag: &str, comment: &str) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            type_tag: tag.to_string(),
            comment: comment.to_string(),
            ..FieldDescriptor::default()
        }
    }

    fn table() -> TypeTable {
        TypeTable::new(vec![
            TypeDescriptor {
                name: "Owner".to_string(),
                fields: vec![field("Name", "string", "// owner name")],
                ..TypeDescriptor::default()
            },
            TypeDescriptor {
                name: "Node".to_string(),
                fields: vec![field("Id", "int", ""), field("Next", "*Node", "")],
                ..TypeDescriptor::default()
            },
        ])
    }

    #[test]
    fn test_empty_fields_yield_no_payload() {
        let types = TypeTable::default();
        let mut synth = SchemaSynthesizer::new(&types);
        assert_eq!(synth.synthesize(&[]), None);
        assert_eq!(synth.synthesize_type("Missing"), None);
    }

    #[test]
    fn test_render_scalars() {
        let types = TypeTable::default();
        let mut synth = SchemaSynthesizer::new(&types);
        let node = synth
            .synthesize(&[
                field("Id", "int64", "// user id"),
                field("Score", "float32", ""),
                field("Ok", "bool", ""),
            ])
            .unwrap();

        assert_eq!(
            synth.render(&node),
            "{\n\t\t\"id\": -0,\t// user id\n\t\t\"score\": -0.000000,\n\t\t\"ok\": false\n\t}"
        );
    }

    #[test]
    fn test_render_nested_and_arrays() {
        let types = table();
        let mut synth = SchemaSynthesizer::new(&types);
        let node = synth
            .synthesize(&[
                field("Tags", "[]string", "// labels"),
                field("Owner", "*Owner", "// ignored on objects"),
            ])
            .unwrap();

        assert_eq!(
            synth.render(&node),
            "{\n\
             \t\t\"tags\": [\t// labels\n\
             \t\t\t\"\"\n\
             \t\t],\n\
             \t\t\"owner\": {\n\
             \t\t\t\"name\": \"\"\t// owner name\n\
             \t\t}\n\
             \t}"
        );
    }

    #[test]
    fn test_unresolvable_fields_are_omitted() {
        let types = TypeTable::default();
        let mut synth = SchemaSynthesizer::new(&types);
        let node = synth
            .synthesize(&[field("A", "Unknown", ""), field("B", "[]Unknown", ""), field("C", "uint8", "")])
            .unwrap();
        assert_eq!(synth.render(&node), "{\n\t\t\"c\": 0\n\t}");
    }

    #[test]
    fn test_all_unresolvable_fields_yield_no_payload() {
        let types = TypeTable::default();
        let mut synth = SchemaSynthesizer::new(&types);
        let fields = [field("A", "pkg.Unknown", ""), field("B", "[]Missing", "")];
        assert_eq!(synth.synthesize(&fields), None);
    }

    #[test]
    fn test_self_reference_stops() {
        let types = table();
        let mut synth = SchemaSynthesizer::new(&types);
        let node = synth.synthesize_type("Node").unwrap();
        assert_eq!(synth.render(&node), "{\n\t\t\"id\": -0,\n\t\t\"next\": {\n\t\t\t\"id\": -0\n\t\t}\n\t}");
    }

    #[test]
    fn test_tokenized_keys() {
        let types = TypeTable::default();
        let mut synth = SchemaSynthesizer::new(&types);
        let node = synth
            .synthesize(&[field("A", "int", ""), field("B", "string", "")])
            .unwrap();
        assert_eq!(
            synth.render_tokenized(&node),
            "{\n\t\t\"a$0\": -0,\n\t\t\"b$1\": \"\"\n\t}"
        );
    }

    #[test]
    fn test_decode_matches_annotated_render() {
        let types = table();
        let mut synth = SchemaSynthesizer::new(&types);
        let node = synth
            .synthesize(&[
                field("Id", "int64", "// user id"),
                field("Tags", "[][]int", "// matrix"),
                field("Owner", "Owner", ""),
                field("Plain", "string", ""),
            ])
            .unwrap();
        let decoded = synth.notes().decode(&synth.render_tokenized(&node));
        assert_eq!(decoded, synth.render(&node));
    }
}
