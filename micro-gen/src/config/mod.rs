//! Configuration management for micro-gen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `MICRO_GEN_` prefix, `__` for nesting)
//! 2. An explicit file (`--config`), or `./micro-gen.toml`
//! 3. `~/.config/micro-gen/config.toml` (user config, XDG)
//! 4. Hardcoded defaults (fallback)
//!
//! Environment variable format: `MICRO_GEN_SECTION__FIELD_NAME`
//! - Example: `MICRO_GEN_SQL__SOFT_DELETE_COLUMN=removed_at`
//!
//! # Example Configuration
//!
//! ```toml
//! # micro-gen.toml
//! [project]
//! name = "demo"
//! import_prefix = "github.com/acme/demo"
//!
//! [sql]
//! soft_delete_column = "deleted_ts"
//! created_at_column = "created_at"
//!
//! [templates]
//! override_dir = "./gen-templates"
//!
//! [output]
//! formatter = "gofmt"
//! banner_tool = "micro gen"
//! ```

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Local configuration file name
pub const LOCAL_CONFIG_FILE: &str = "micro-gen.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "MICRO_GEN_";

/// Project identity fallbacks, used when the metadata document omits them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Project identifier
    pub name: String,

    /// Import path prefix of the generated packages
    pub import_prefix: String,
}

/// Reserved column names of the SQL fragment synthesizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlSettings {
    /// Soft-delete marker, excluded from every fragment
    pub soft_delete_column: String,

    /// Creation timestamp, excluded from update and upsert fragments
    pub created_at_column: String,
}

impl Default for SqlSettings {
    fn default() -> Self {
        Self {
            soft_delete_column: "deleted_ts".to_string(),
            created_at_column: "created_at".to_string(),
        }
    }
}

/// Template settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory of user template overrides
    pub override_dir: Option<PathBuf>,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Formatter command for Go sources; empty disables formatting
    pub formatter: String,

    /// Tool name printed in generated banners
    pub banner_tool: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            formatter: "gofmt".to_string(),
            banner_tool: "micro gen".to_string(),
        }
    }
}

/// Complete micro-gen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroGenConfig {
    /// Project identity fallbacks
    #[serde(default)]
    pub project: ProjectSettings,

    /// Reserved SQL column names
    #[serde(default)]
    pub sql: SqlSettings,

    /// Template overrides
    #[serde(default)]
    pub templates: TemplateSettings,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,
}

impl MicroGenConfig {
    /// Load configuration from the standard locations
    ///
    /// `explicit` replaces `./micro-gen.toml` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file contains invalid TOML syntax
    /// - Configuration values fail type conversion
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use micro_gen::config::MicroGenConfig;
    ///
    /// # fn example() -> micro_gen::Result<()> {
    /// let config = MicroGenConfig::load(None)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Self::defaults()?;

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = explicit.map_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE), Path::to_path_buf);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        } else if explicit.is_some() {
            tracing::warn!(path = %local_config.display(), "Configuration file not found, using defaults");
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file, ignoring the user config
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or values fail
    /// type conversion. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::defaults()?
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Get the recommended XDG config path
    ///
    /// # Example
    ///
    /// ```rust
    /// use micro_gen::config::MicroGenConfig;
    ///
    /// let path = MicroGenConfig::recommended_path();
    /// // Returns: ~/.config/micro-gen/config.toml
    /// ```
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(LOCAL_CONFIG_FILE),
            |config_dir| config_dir.join("micro-gen").join("config.toml"),
        )
    }

    fn defaults() -> Result<Figment> {
        let defaults = toml::to_string(&Self::default())
            .map_err(|e| figment::Error::from(format!("default configuration: {e}")))?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = MicroGenConfig::default();
        assert_eq!(config.sql.soft_delete_column, "deleted_ts");
        assert_eq!(config.sql.created_at_column, "created_at");
        assert_eq!(config.output.formatter, "gofmt");
        assert_eq!(config.output.banner_tool, "micro gen");
        assert!(config.templates.override_dir.is_none());
    }

    #[test]
    fn test_defaults_layer_reports_config_errors() {
        let config: MicroGenConfig = MicroGenConfig::defaults().unwrap().extract().unwrap();
        assert_eq!(config.sql.soft_delete_column, "deleted_ts");

        let err: crate::GenError = figment::Error::from("default configuration: bad".to_string()).into();
        assert!(matches!(err, crate::GenError::Config(_)));
    }

    #[test]
    fn test_recommended_path() {
        let path = MicroGenConfig::recommended_path();
        assert!(path.to_str().unwrap().ends_with("config.toml"));
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let config = MicroGenConfig::load_from(Path::new("/nonexistent/path/micro-gen.toml")).unwrap();
        assert_eq!(config.sql.soft_delete_column, "deleted_ts");
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("micro-gen.toml");
        fs::write(
            &path,
            r#"
[project]
import_prefix = "github.com/acme/demo"

[sql]
soft_delete_column = "removed_at"

[output]
formatter = ""
"#,
        )
        .unwrap();

        let config = MicroGenConfig::load_from(&path).unwrap();
        assert_eq!(config.project.import_prefix, "github.com/acme/demo");
        assert_eq!(config.sql.soft_delete_column, "removed_at");
        assert_eq!(config.sql.created_at_column, "created_at");
        assert!(config.output.formatter.is_empty());
        assert_eq!(config.output.banner_tool, "micro gen");
    }
}
