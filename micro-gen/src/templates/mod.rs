//! Template store
//!
//! One template text per artifact key, plus the README template and one
//! handlebars template per model storage style. A store is a plain value
//! handed to the generator; runs never share template state.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{GenError, Result};
use crate::metadata::ModelStyle;

pub mod files;
pub mod models;
pub mod policy;

pub use policy::{banner_for, policy_for, Banner, FilePolicy, RegenerationPolicy, FILE_POLICIES};

/// Key of the README template
pub const README_KEY: &str = "README.md";

/// Override key of the relational model template
pub const MYSQL_MODEL_KEY: &str = "model/mysql.hbs";

/// Override key of the document model template
pub const MONGO_MODEL_KEY: &str = "model/mongo.hbs";

/// Built-in template for each artifact key
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("main.go", files::MAIN_GO),
    ("config.go", files::CONFIG_GO),
    (".gitignore", files::GITIGNORE),
    ("args/const.go", files::ARGS_CONST_GO),
    ("args/var.go", files::ARGS_VAR_GO),
    ("args/type.go", files::ARGS_TYPE_GO),
    ("args/const.gen.go", files::ARGS_CONST_GEN_GO),
    ("args/type.gen.go", files::ARGS_TYPE_GEN_GO),
    ("api/handler.go", files::API_HANDLER_GO),
    ("api/router.go", files::API_ROUTER_GO),
    ("api/router.gen.go", files::API_ROUTER_GEN_GO),
    ("api/pull_handler.gen.go", files::API_PULL_HANDLER_GEN_GO),
    ("api/push_handler.gen.go", files::API_PUSH_HANDLER_GEN_GO),
    ("logic/tmp_code.gen.go", files::LOGIC_TMP_CODE_GEN_GO),
    ("logic/model/init.go", files::LOGIC_MODEL_INIT_GO),
    ("sdk/rpc.go", files::SDK_RPC_GO),
    ("sdk/rpc_test.go", files::SDK_RPC_TEST_GO),
    ("sdk/rpc.gen.go", files::SDK_RPC_GEN_GO),
    ("sdk/rpc.gen_test.go", files::SDK_RPC_GEN_TEST_GO),
];

/// Templates used by one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStore {
    files: BTreeMap<String, String>,
    readme: String,
    mysql_model: String,
    mongo_model: String,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateStore {
    /// The embedded templates
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            files: BUILTIN_TEMPLATES
                .iter()
                .map(|(key, text)| ((*key).to_string(), (*text).to_string()))
                .collect(),
            readme: files::README_MD.to_string(),
            mysql_model: models::MYSQL_MODEL.to_string(),
            mongo_model: models::MONGO_MODEL.to_string(),
        }
    }

    /// The embedded templates with every matching file under `dir` applied
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be walked, an override cannot
    /// be read, or an override lacks a required placeholder.
    pub fn with_overrides(dir: &Path) -> Result<Self> {
        let mut store = Self::builtin();
        store.apply_overrides(dir)?;
        Ok(store)
    }

    /// Apply override files found under `dir`, returning how many matched
    ///
    /// A file overrides the template whose key equals its path relative to
    /// `dir`. Files matching no key are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`TemplateStore::with_overrides`].
    pub fn apply_overrides(&mut self, dir: &Path) -> Result<usize> {
        let mut applied = 0;

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                GenError::io(path, std::io::Error::other(e.to_string()))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(dir) else {
                continue;
            };
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if !self.contains(&key) {
                tracing::warn!(file = %entry.path().display(), "Ignoring unknown template override");
                continue;
            }

            let text = fs::read_to_string(entry.path()).map_err(|e| GenError::io(entry.path(), e))?;
            self.set(&key, text)?;
            tracing::debug!(template = %key, "Applied template override");
            applied += 1;
        }

        Ok(applied)
    }

    /// Whether `key` names a known template
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.files.contains_key(key) || matches!(key, README_KEY | MYSQL_MODEL_KEY | MONGO_MODEL_KEY)
    }

    /// Replace one template
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Template`] for an unknown key, or when the text
    /// drops a placeholder the generator fills for that key.
    pub fn set(&mut self, key: &str, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        let slot = match key {
            README_KEY => &mut self.readme,
            MYSQL_MODEL_KEY => &mut self.mysql_model,
            MONGO_MODEL_KEY => &mut self.mongo_model,
            _ => self
                .files
                .get_mut(key)
                .ok_or_else(|| GenError::template(key, "unknown template key"))?,
        };

        for placeholder in required_placeholders(key) {
            if !text.contains(placeholder) {
                return Err(GenError::template(
                    key,
                    format!("missing placeholder {placeholder}"),
                ));
            }
        }

        *slot = text;
        Ok(())
    }

    /// Template text of an artifact key
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Template`] for an unknown key.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.files
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| GenError::template(key, "unknown template key"))
    }

    /// Artifact keys with a template, in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// README template
    #[must_use]
    pub fn readme(&self) -> &str {
        &self.readme
    }

    /// Model template for a storage style
    #[must_use]
    pub fn model(&self, style: ModelStyle) -> &str {
        match style {
            ModelStyle::Relational => &self.mysql_model,
            ModelStyle::Document => &self.mongo_model,
        }
    }
}

fn required_placeholders(key: &str) -> &'static [&'static str] {
    match key {
        README_KEY => &["${readme}"],
        _ => match policy::lookup(key) {
            Some(p) => p.placeholders,
            None => &[],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_policy_table() {
        let store = TemplateStore::builtin();
        for p in FILE_POLICIES {
            let text = store.get(p.key).unwrap();
            for placeholder in p.placeholders {
                assert!(text.contains(placeholder), "{} lacks {placeholder}", p.key);
            }
        }
        assert_eq!(store.keys().count(), FILE_POLICIES.len());
    }

    #[test]
    fn test_unknown_key() {
        let store = TemplateStore::builtin();
        assert!(matches!(store.get("nope.go"), Err(GenError::Template { .. })));
    }

    #[test]
    fn test_set_rejects_missing_placeholder() {
        let mut store = TemplateStore::builtin();
        let err = store.set("api/router.gen.go", "package api\n").unwrap_err();
        assert!(err.to_string().contains("${register_router_list}"));
        // original text kept
        assert!(store
            .get("api/router.gen.go")
            .unwrap()
            .contains("${register_router_list}"));
    }

    #[test]
    fn test_overrides_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("api")).unwrap();
        fs::create_dir_all(dir.path().join("model")).unwrap();
        fs::write(dir.path().join("api/handler.go"), "package api\n// mine\n").unwrap();
        fs::write(dir.path().join("model/mongo.hbs"), "package model\n// {{name}}\n").unwrap();
        fs::write(dir.path().join("unrelated.txt"), "ignored").unwrap();

        let store = TemplateStore::with_overrides(dir.path()).unwrap();
        assert_eq!(store.get("api/handler.go").unwrap(), "package api\n// mine\n");
        assert_eq!(store.model(ModelStyle::Document), "package model\n// {{name}}\n");
        assert_eq!(store.model(ModelStyle::Relational), models::MYSQL_MODEL);
    }

    #[test]
    fn test_stores_are_independent() {
        let mut a = TemplateStore::builtin();
        let b = TemplateStore::builtin();
        a.set(".gitignore", "bin/\n").unwrap();
        assert_ne!(a, b);
        assert_eq!(b.get(".gitignore").unwrap(), files::GITIGNORE);
    }
}
