//! Source formatting hook
//!
//! The generator hands every artifact to a [`SourceFormatter`] before it
//! leaves the engine. Implementations that validate syntax report failures as
//! [`GenError::Format`](crate::GenError::Format) carrying the offending text.

use crate::error::Result;

/// Pretty-prints or validates generated source
pub trait SourceFormatter {
    /// Format the text of the artifact `key`
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not valid in the target language.
    fn format(&self, key: &str, source: &str) -> Result<String>;
}

/// Formatter that returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl SourceFormatter for NoopFormatter {
    fn format(&self, _key: &str, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

impl<F: SourceFormatter + ?Sized> SourceFormatter for &F {
    fn format(&self, key: &str, source: &str) -> Result<String> {
        (**self).format(key, source)
    }
}

impl<F: SourceFormatter + ?Sized> SourceFormatter for Box<F> {
    fn format(&self, key: &str, source: &str) -> Result<String> {
        (**self).format(key, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_is_identity() {
        let text = "package main\n";
        assert_eq!(NoopFormatter.format("main.go", text).unwrap(), text);
    }

    #[test]
    fn test_boxed_formatter() {
        let boxed: Box<dyn SourceFormatter> = Box::new(NoopFormatter);
        assert_eq!(boxed.format("a.go", "x").unwrap(), "x");
    }
}
