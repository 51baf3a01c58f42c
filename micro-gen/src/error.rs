//! Error types and error handling

use std::path::PathBuf;

use thiserror::Error;

/// Generator error type
///
/// Every variant aborts the generation run. Recoverable conditions, such as a
/// field whose type cannot be resolved for documentation, never surface here.
#[derive(Debug, Error)]
pub enum GenError {
    /// Malformed template text, unknown template key or missing placeholder
    #[error("Template error in '{key}': {message}")]
    Template {
        /// Artifact key of the offending template
        key: String,
        /// What went wrong
        message: String,
    },

    /// Model template could not be compiled
    #[error("Template parse error: {0}")]
    TemplateParse(#[from] Box<handlebars::TemplateError>),

    /// Model template could not be rendered
    #[error("Template render error: {0}")]
    Render(#[from] Box<handlebars::RenderError>),

    /// Generated text failed target-language validation
    #[error("Format error in '{key}': {message}\ncode:\n{source_text}")]
    Format {
        /// Artifact key of the offending file
        key: String,
        /// Formatter diagnostic
        message: String,
        /// The generated text that failed to format
        source_text: String,
    },

    /// A model has no column left for one of its SQL fragments
    #[error("Model '{model}' has no eligible fields for the {fragment} fragment")]
    EmptyFragment {
        /// Model name
        model: String,
        /// Fragment that would be empty
        fragment: &'static str,
    },

    /// Two handlers share the same full name
    #[error("Duplicate handler name: {name}")]
    DuplicateHandler {
        /// The repeated full name
        name: String,
    },

    /// Metadata document could not be decoded
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// File system error
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    /// Build a [`GenError::Template`]
    pub fn template(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Template {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Build a [`GenError::Io`]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<handlebars::TemplateError> for GenError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::TemplateParse(Box::new(err))
    }
}

impl From<handlebars::RenderError> for GenError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Render(Box::new(err))
    }
}

impl From<figment::Error> for GenError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fragment_message() {
        let err = GenError::EmptyFragment {
            model: "User".to_string(),
            fragment: "update",
        };
        assert_eq!(
            err.to_string(),
            "Model 'User' has no eligible fields for the update fragment"
        );
    }

    #[test]
    fn test_format_error_surfaces_source() {
        let err = GenError::Format {
            key: "api/router.gen.go".to_string(),
            message: "expected '}'".to_string(),
            source_text: "func Route(".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("api/router.gen.go"));
        assert!(text.contains("func Route("));
    }
}
