//! Field type tags and their classification
//!
//! Field types arrive as Go type expressions (`*int64`, `[]string`,
//! `time.Time`, `[]*Item`). This module classifies them once so the schema
//! synthesizer and the type emitter agree on what each tag means.
//!
//! # Classification
//!
//! | tag                                         | kind            |
//! |---------------------------------------------|-----------------|
//! | `bool`                                      | `Bool`          |
//! | `string`, `[]byte`, `time.Time`             | `Str`           |
//! | `int`, `int8` .. `int64`, `rune`            | `Int`           |
//! | `uint`, `uint8` .. `uint64`, `uintptr`, `byte` | `Uint`       |
//! | `float32`, `float64`                        | `Float`         |
//! | `[]T` (except `[]byte`)                     | `Slice(T)`      |
//! | anything else                               | `Named(tag)`    |
//!
//! Pointer markers are stripped everywhere in the tag before matching.

use std::fmt;

/// Go type expression for `time.Time`
pub const TIME_TYPE: &str = "time.Time";

/// Classified field type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Boolean
    Bool,
    /// String-like: `string`, byte sequence, `time.Time`
    Str,
    /// Signed integer kinds and `rune`
    Int,
    /// Unsigned integer kinds and `byte`
    Uint,
    /// Floating point kinds
    Float,
    /// Slice of another kind
    Slice(Box<FieldKind>),
    /// Anything else, resolved through the type table
    Named(String),
}

impl FieldKind {
    /// Classify a raw type tag
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::metadata::FieldKind;
    /// assert_eq!(FieldKind::parse("*int64"), FieldKind::Int);
    /// assert_eq!(FieldKind::parse("[]byte"), FieldKind::Str);
    /// assert_eq!(FieldKind::parse("[]*Item"), FieldKind::Slice(Box::new(FieldKind::Named("Item".into()))));
    /// ```
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let tag: String = tag.chars().filter(|c| *c != '*' && !c.is_whitespace()).collect();
        Self::classify(&tag)
    }

    fn classify(tag: &str) -> Self {
        if tag == "[]byte" || tag == "[]uint8" {
            return Self::Str;
        }
        if let Some(element) = tag.strip_prefix("[]") {
            return Self::Slice(Box::new(Self::classify(element)));
        }
        match tag {
            "bool" => Self::Bool,
            "string" | TIME_TYPE => Self::Str,
            "int" | "int8" | "int16" | "int32" | "int64" | "rune" => Self::Int,
            "uint" | "uint8" | "uint16" | "uint32" | "uint64" | "uintptr" | "byte" => Self::Uint,
            "float32" | "float64" => Self::Float,
            other => Self::Named(other.to_string()),
        }
    }

    /// Whether the kind (or, for slices, its innermost element) is a scalar
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        match self {
            Self::Slice(element) => element.is_scalar(),
            Self::Named(_) => false,
            _ => true,
        }
    }

    /// Example JSON literal for scalar kinds
    ///
    /// Integers render as `-0` and floats as `-0.000000` so readers can tell
    /// the example numeric class apart from unsigned values.
    #[must_use]
    pub const fn example_literal(&self) -> Option<&'static str> {
        match self {
            Self::Bool => Some("false"),
            Self::Str => Some("\"\""),
            Self::Int => Some("-0"),
            Self::Uint => Some("0"),
            Self::Float => Some("-0.000000"),
            Self::Slice(_) | Self::Named(_) => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Str => write!(f, "string"),
            Self::Int => write!(f, "int"),
            Self::Uint => write!(f, "uint"),
            Self::Float => write!(f, "float"),
            Self::Slice(element) => write!(f, "[]{element}"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Whether a raw type tag mentions `time.Time` anywhere
#[must_use]
pub fn uses_time(tag: &str) -> bool {
    tag.contains(TIME_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        let cases = vec![
            ("bool", FieldKind::Bool),
            ("string", FieldKind::Str),
            ("time.Time", FieldKind::Str),
            ("*time.Time", FieldKind::Str),
            ("int", FieldKind::Int),
            ("int32", FieldKind::Int),
            ("rune", FieldKind::Int),
            ("uint16", FieldKind::Uint),
            ("byte", FieldKind::Uint),
            ("float64", FieldKind::Float),
            ("**float32", FieldKind::Float),
        ];

        for (tag, expected) in cases {
            assert_eq!(FieldKind::parse(tag), expected, "tag {tag}");
        }
    }

    #[test]
    fn test_byte_slice_is_string() {
        assert_eq!(FieldKind::parse("[]byte"), FieldKind::Str);
        assert_eq!(FieldKind::parse("*[]byte"), FieldKind::Str);
    }

    #[test]
    fn test_parse_slices() {
        assert_eq!(
            FieldKind::parse("[]string"),
            FieldKind::Slice(Box::new(FieldKind::Str))
        );
        assert_eq!(
            FieldKind::parse("[][]int"),
            FieldKind::Slice(Box::new(FieldKind::Slice(Box::new(FieldKind::Int))))
        );
    }

    #[test]
    fn test_named_types_are_not_prefix_matched() {
        // "interval" starts with "int" but is not an integer kind
        assert_eq!(
            FieldKind::parse("interval"),
            FieldKind::Named("interval".to_string())
        );
        assert_eq!(
            FieldKind::parse("*args.Item"),
            FieldKind::Named("args.Item".to_string())
        );
    }

    #[test]
    fn test_is_scalar() {
        assert!(FieldKind::parse("[]int").is_scalar());
        assert!(!FieldKind::parse("[]Item").is_scalar());
        assert!(!FieldKind::parse("Item").is_scalar());
    }

    #[test]
    fn test_example_literals() {
        assert_eq!(FieldKind::Bool.example_literal(), Some("false"));
        assert_eq!(FieldKind::Str.example_literal(), Some("\"\""));
        assert_eq!(FieldKind::Int.example_literal(), Some("-0"));
        assert_eq!(FieldKind::Uint.example_literal(), Some("0"));
        assert_eq!(FieldKind::Float.example_literal(), Some("-0.000000"));
        assert_eq!(FieldKind::parse("[]int").example_literal(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldKind::parse("[]*int64").to_string(), "[]int");
    }

    #[test]
    fn test_uses_time() {
        assert!(uses_time("[]*time.Time"));
        assert!(!uses_time("int64"));
    }
}
