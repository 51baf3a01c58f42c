//! Constant and type definition emission

use std::collections::BTreeSet;

use crate::helpers::{CommentHelpers, NameHelpers};
use crate::metadata::{uses_time, FieldDescriptor, MetadataGraph, ModelStyle, TypeDescriptor};

/// Create-table statement constants, one per relational model
///
/// The constants start empty: a Go raw string cannot hold the backquoted
/// identifiers of the statement, so it is filled in by hand.
#[must_use]
pub fn const_list(graph: &MetadataGraph) -> String {
    graph
        .models_of(ModelStyle::Relational)
        .map(|m| {
            let name = format!("{}Sql", m.name);
            format!(
                "// {name} the statement to create '{}' mysql table\nconst {name} string = ``\n",
                NameHelpers::to_snake_case(&m.name)
            )
        })
        .collect()
}

/// Import lines of the type definition file
///
/// Metadata imports plus `time` when any field needs it, deduplicated and
/// sorted.
#[must_use]
pub fn import_list(graph: &MetadataGraph) -> String {
    let mut imports: BTreeSet<String> = graph
        .imports
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(quote_import)
        .collect();

    let needs_time = graph
        .types
        .iter()
        .flat_map(|t| &t.fields)
        .any(|f| uses_time(&f.type_tag));
    if needs_time {
        imports.insert("\"time\"".to_string());
    }

    imports
        .iter()
        .map(|i| format!("\t{i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Struct definitions of every type in the table
#[must_use]
pub fn type_define_list(graph: &MetadataGraph) -> String {
    graph
        .types
        .iter()
        .map(type_define)
        .collect::<Vec<_>>()
        .join("\n")
}

fn type_define(t: &TypeDescriptor) -> String {
    let mut out = CommentHelpers::to_line_comments(&t.doc);
    out.push_str(&format!("type {} struct {{\n", t.name));
    for field in &t.fields {
        out.push_str(&field_define(field));
    }
    out.push_str("}\n");
    out
}

fn field_define(f: &FieldDescriptor) -> String {
    let mut out: String = CommentHelpers::to_line_comments(&f.doc)
        .lines()
        .map(|line| format!("\t{line}\n"))
        .collect();

    let mut tags = format!("json:\"{}\"", f.column_name());
    if f.is_primary {
        tags.push_str(" key:\"pri\"");
    } else if f.is_unique {
        tags.push_str(" key:\"uni\"");
    }
    out.push_str(&format!("\t{} {} `{tags}`", f.name, f.type_tag.trim()));

    let comment = CommentHelpers::plain_text(&f.comment);
    if !comment.is_empty() {
        out.push_str(&format!(" // {comment}"));
    }
    out.push('\n');
    out
}

fn quote_import(import: &str) -> String {
    if import.contains('"') {
        import.to_string()
    } else {
        format!("\"{import}\"")
    }
}
