//! README assembly
//!
//! One section per handler: doc text, full URI, and annotated example
//! payloads for the request and the result.

use std::fmt::Write as _;

use crate::error::Result;
use crate::helpers::{CommentHelpers, NameHelpers};
use crate::metadata::{HandlerDescriptor, MetadataGraph};
use crate::schema::SchemaSynthesizer;
use crate::substitute::{self, Substitution};
use crate::templates::README_KEY;

/// Builds README.md from the metadata graph
#[derive(Debug)]
pub struct ReadmeAssembler<'a> {
    graph: &'a MetadataGraph,
    project_name: &'a str,
    schema: SchemaSynthesizer<'a>,
}

impl<'a> ReadmeAssembler<'a> {
    /// Create an assembler for a project
    #[must_use]
    pub fn new(graph: &'a MetadataGraph, project_name: &'a str) -> Self {
        Self {
            graph,
            project_name,
            schema: SchemaSynthesizer::new(&graph.types),
        }
    }

    /// Markdown body inserted at `${readme}`
    #[must_use]
    pub fn body(&mut self) -> String {
        let mut text = html(&self.graph.project.doc);
        text.push_str("\n## API Desc\n\n");
        let graph = self.graph;
        for handler in &graph.handlers {
            let section = self.section(handler);
            let _ = write!(text, "### {}\n\n{section}\n\n", handler.full_name);
        }
        text
    }

    /// Fill the README template
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Template`](crate::GenError::Template) when the
    /// template has no `${readme}` placeholder.
    pub fn assemble(mut self, template: &str) -> Result<String> {
        let body = self.body();
        let mut text = Substitution::new(README_KEY, template);
        text.replace_optional(substitute::PROJ_NAME, self.project_name)
            .replace(substitute::README, &body)?;
        Ok(text.into_text())
    }

    fn section(&mut self, handler: &HandlerDescriptor) -> String {
        let uri = NameHelpers::to_uri(self.project_name, &handler.uri);
        let mut text = html(&handler.doc);
        text.push('\n');
        let _ = write!(text, "- URI:\n\t```\n\t{uri}\n\t```\n");

        text.push_str(&self.payload_block("REQUEST", &handler.arg_type));
        text.push_str(&self.payload_block("RESULT", &handler.result_type));
        text
    }

    fn payload_block(&mut self, title: &str, type_name: &str) -> String {
        let mut text = format!("- {title}:\n");
        match self.schema.synthesize_type(type_name) {
            Some(node) => {
                let json = self.schema.render(&node);
                let _ = write!(text, "\t```json\n\t{json}\n\t```\n");
            }
            None => {
                tracing::debug!(type_name = %type_name, "No example payload for type");
            }
        }
        text
    }
}

fn html(doc: &str) -> String {
    CommentHelpers::to_html(&CommentHelpers::to_line_comments(doc))
}
