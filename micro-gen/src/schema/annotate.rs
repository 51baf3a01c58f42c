//! Field notes and annotation decoding
//!
//! Scalar keys of a synthesized schema carry a [`NoteId`] into a
//! [`NoteTable`]. The table is an arena owned by one synthesis run; ids are
//! indices into it, handed out in increasing order, so two fields can never
//! share one.
//!
//! The table also decodes tokenized text (`"key$3": value`) produced by a
//! renderer that knows nothing about notes, stripping each token and placing
//! the note after the value.

use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::helpers::CommentHelpers;

/// Index of a note in its [`NoteTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(usize);

impl NoteId {
    /// Raw index
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Documentation attached to one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    /// Doc comment above the field
    pub doc: String,
    /// Trailing line comment
    pub comment: String,
}

impl Note {
    /// Single-line text: doc when present, else comment, markers stripped
    #[must_use]
    pub fn text(&self) -> String {
        let doc = CommentHelpers::plain_text(&self.doc);
        if doc.is_empty() {
            CommentHelpers::plain_text(&self.comment)
        } else {
            doc
        }
    }

    /// Inline annotation appended after a value, empty when there is no text
    #[must_use]
    pub fn annotation(&self) -> String {
        let text = self.text();
        if text.is_empty() {
            text
        } else {
            format!("\t// {text}")
        }
    }
}

/// Arena of notes for one synthesis run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteTable {
    notes: Vec<Note>,
}

impl NoteTable {
    /// Empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a note and return its id
    pub fn insert(&mut self, doc: &str, comment: &str) -> NoteId {
        self.notes.push(Note {
            doc: doc.to_string(),
            comment: comment.to_string(),
        });
        NoteId(self.notes.len() - 1)
    }

    /// Look a note up
    #[must_use]
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(id.0)
    }

    /// Annotation for an id, empty for unknown ids
    #[must_use]
    pub fn annotation(&self, id: NoteId) -> String {
        self.get(id).map(Note::annotation).unwrap_or_default()
    }

    /// Number of notes
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Strip `$<id>` tokens from keys and append each note after its value
    ///
    /// Lines without a token pass through unchanged. The line ending, and
    /// the trailing comma when present, are kept exactly where they were.
    #[must_use]
    pub fn decode(&self, tokenized: &str) -> String {
        token_pattern()
            .replace_all(tokenized, |caps: &Captures<'_>| {
                let annotation = caps[2]
                    .parse::<usize>()
                    .map(|i| self.annotation(NoteId(i)))
                    .unwrap_or_default();
                format!("{}{}{annotation}", &caps[1], &caps[3])
            })
            .into_owned()
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"("[^"\n]*)\$(\d+)(":[^\n]*)"#).expect("Invalid regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut table = NoteTable::new();
        let a = table.insert("", "// a");
        let b = table.insert("", "// b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_doc_preferred_over_comment() {
        let note = Note {
            doc: "// user id\n".to_string(),
            comment: "// ignored".to_string(),
        };
        assert_eq!(note.annotation(), "\t// user id");
    }

    #[test]
    fn test_empty_note_has_no_annotation() {
        assert_eq!(Note::default().annotation(), "");
    }

    #[test]
    fn test_decode_keeps_comma_and_newline() {
        let mut table = NoteTable::new();
        let id = table.insert("", "// user id");
        let name = table.insert("// nickname\n// max 32 chars\n", "");
        let text = format!(
            "{{\n\t\t\"id${id}\": -0,\n\t\t\"name${name}\": \"\"\n\t}}"
        );

        assert_eq!(
            table.decode(&text),
            "{\n\t\t\"id\": -0,\t// user id\n\t\t\"name\": \"\"\t// nickname max 32 chars\n\t}"
        );
    }

    #[test]
    fn test_decode_without_note_text() {
        let mut table = NoteTable::new();
        let id = table.insert("", "");
        let text = format!("\"n${id}\": 0,\n");
        assert_eq!(table.decode(&text), "\"n\": 0,\n");
    }

    #[test]
    fn test_decode_leaves_plain_keys() {
        let table = NoteTable::new();
        let text = "{\n\t\t\"item\": {}\n\t}";
        assert_eq!(table.decode(text), text);
    }
}
