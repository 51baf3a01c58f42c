//! `gofmt` formatter hook
//!
//! Pipes every `.go` artifact through an external `gofmt` process. A
//! non-zero exit means the generated text is not valid Go, which aborts the
//! run with the offending source attached.

use std::io::Write;
use std::process::{Command, Stdio};

use micro_gen::{GenError, SourceFormatter};

/// Formats Go sources with an external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GofmtFormatter {
    command: String,
}

impl Default for GofmtFormatter {
    fn default() -> Self {
        Self::new("gofmt")
    }
}

impl GofmtFormatter {
    /// Use `command` as the formatter executable
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Formatter executable
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether the executable can be started
    #[must_use]
    pub fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("-l")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }
}

impl SourceFormatter for GofmtFormatter {
    fn format(&self, key: &str, source: &str) -> micro_gen::Result<String> {
        if !key.ends_with(".go") {
            return Ok(source.to_string());
        }

        let mut child = Command::new(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GenError::io(&self.command, e))?;

        // gofmt reads all of stdin before writing, so this cannot deadlock
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| GenError::io(&self.command, e))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| GenError::io(&self.command, e))?;

        if !output.status.success() {
            return Err(GenError::Format {
                key: key.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                source_text: source.to_string(),
            });
        }

        tracing::trace!(artifact = %key, "Formatted with {}", self.command);
        String::from_utf8(output.stdout).map_err(|e| GenError::Format {
            key: key.to_string(),
            message: e.to_string(),
            source_text: source.to_string(),
        })
    }
}
