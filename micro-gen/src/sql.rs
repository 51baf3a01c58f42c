//! SQL fragment synthesis
//!
//! Derives the column lists shared by the relational and document model
//! templates. Fields are taken in declaration order under these exclusions:
//!
//! | column                | insert | update / upsert |
//! |-----------------------|--------|-----------------|
//! | primary key           | no     | no              |
//! | soft-delete marker    | no     | no              |
//! | creation timestamp    | yes    | no              |
//! | anything else         | yes    | yes             |

use serde::Serialize;

use crate::config::SqlSettings;
use crate::error::{GenError, Result};
use crate::metadata::{FieldDescriptor, ModelDescriptor};

/// Statement fragments of one model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SqlFragments {
    /// `` `a`,`b` ``
    pub insert_columns: String,
    /// `:a,:b`
    pub insert_placeholders: String,
    /// `` `a`=:a,`b`=:b ``
    pub update_assignments: String,
    /// `` `a`=VALUES(`a`),`b`=VALUES(`b`); ``
    pub upsert_assignments: String,
}

/// Fragment synthesizer bound to the reserved column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlSynthesizer {
    soft_delete_column: String,
    created_at_column: String,
}

impl Default for SqlSynthesizer {
    fn default() -> Self {
        Self::new(&SqlSettings::default())
    }
}

impl SqlSynthesizer {
    /// Create a synthesizer from settings
    #[must_use]
    pub fn new(settings: &SqlSettings) -> Self {
        Self {
            soft_delete_column: settings.soft_delete_column.clone(),
            created_at_column: settings.created_at_column.clone(),
        }
    }

    /// Derive the fragments of a model
    ///
    /// # Errors
    ///
    /// Returns [`GenError::EmptyFragment`] when no column survives the
    /// exclusions for the insert or the update fragments.
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::metadata::{FieldDescriptor, ModelDescriptor};
    /// # use micro_gen::sql::SqlSynthesizer;
    /// let field = |name: &str| FieldDescriptor { name: name.into(), ..Default::default() };
    /// let mut id = field("Id");
    /// id.is_primary = true;
    /// let model = ModelDescriptor {
    ///     name: "User".into(),
    ///     fields: vec![id, field("Name"), field("CreatedAt")],
    ///     ..Default::default()
    /// };
    ///
    /// let sql = SqlSynthesizer::default().synthesize(&model).unwrap();
    /// assert_eq!(sql.insert_columns, "`name`,`created_at`");
    /// assert_eq!(sql.insert_placeholders, ":name,:created_at");
    /// assert_eq!(sql.update_assignments, "`name`=:name");
    /// assert_eq!(sql.upsert_assignments, "`name`=VALUES(`name`);");
    /// ```
    pub fn synthesize(&self, model: &ModelDescriptor) -> Result<SqlFragments> {
        let primary: Vec<String> = model.primary().iter().map(|f| f.column_name()).collect();

        let insertable: Vec<String> = model
            .fields
            .iter()
            .map(FieldDescriptor::column_name)
            .filter(|c| *c != self.soft_delete_column && !primary.contains(c))
            .collect();

        if insertable.is_empty() {
            return Err(empty(model, "insert"));
        }

        let updatable: Vec<&String> = insertable
            .iter()
            .filter(|c| **c != self.created_at_column)
            .collect();

        if updatable.is_empty() {
            return Err(empty(model, "update"));
        }

        tracing::debug!(
            model = %model.name,
            insert = insertable.len(),
            update = updatable.len(),
            "Synthesized SQL fragments"
        );

        Ok(SqlFragments {
            insert_columns: join(&insertable, |c| format!("`{c}`")),
            insert_placeholders: join(&insertable, |c| format!(":{c}")),
            update_assignments: join(&updatable, |c| format!("`{c}`=:{c}")),
            upsert_assignments: join(&updatable, |c| format!("`{c}`=VALUES(`{c}`)")) + ";",
        })
    }
}

/// Named-parameter condition matching a model's primary key
///
/// # Examples
///
/// ```
/// # use micro_gen::metadata::{FieldDescriptor, ModelDescriptor};
/// # use micro_gen::sql::primary_where;
/// let model = ModelDescriptor {
///     fields: vec![
///         FieldDescriptor { name: "Id".into(), is_primary: true, ..Default::default() },
///         FieldDescriptor { name: "Shard".into(), is_primary: true, ..Default::default() },
///     ],
///     ..Default::default()
/// };
/// assert_eq!(primary_where(&model), "`id`=:id AND `shard`=:shard");
/// ```
#[must_use]
pub fn primary_where(model: &ModelDescriptor) -> String {
    model
        .primary()
        .iter()
        .map(|f| {
            let c = f.column_name();
            format!("`{c}`=:{c}")
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn join<S: AsRef<str>>(columns: &[S], render: impl Fn(&str) -> String) -> String {
    columns
        .iter()
        .map(|c| render(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

fn empty(model: &ModelDescriptor, fragment: &'static str) -> GenError {
    GenError::EmptyFragment {
        model: model.name.clone(),
        fragment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            type_tag: "string".to_string(),
            ..FieldDescriptor::default()
        }
    }

    fn model(fields: Vec<FieldDescriptor>) -> ModelDescriptor {
        ModelDescriptor {
            name: "User".to_string(),
            fields,
            ..ModelDescriptor::default()
        }
    }

    #[test]
    fn test_exclusions() {
        let mut id = field("Id");
        id.is_primary = true;
        let m = model(vec![id, field("CreatedAt"), field("Name"), field("DeletedTs")]);

        let sql = SqlSynthesizer::default().synthesize(&m).unwrap();
        assert_eq!(sql.insert_columns, "`created_at`,`name`");
        assert_eq!(sql.insert_placeholders, ":created_at,:name");
        assert_eq!(sql.update_assignments, "`name`=:name");
        assert_eq!(sql.upsert_assignments, "`name`=VALUES(`name`);");
    }

    #[test]
    fn test_model_name_overrides_column() {
        let mut f = field("Nick");
        f.model_name = "nickname".to_string();
        let sql = SqlSynthesizer::default().synthesize(&model(vec![f])).unwrap();
        assert_eq!(sql.update_assignments, "`nickname`=:nickname");
    }

    #[test]
    fn test_primary_listed_by_name() {
        let mut m = model(vec![field("Uid"), field("Name")]);
        m.primary_fields = vec!["Uid".to_string()];
        let sql = SqlSynthesizer::default().synthesize(&m).unwrap();
        assert_eq!(sql.insert_columns, "`name`");
    }

    #[test]
    fn test_custom_reserved_columns() {
        let settings = SqlSettings {
            soft_delete_column: "removed_at".to_string(),
            created_at_column: "ctime".to_string(),
        };
        let m = model(vec![field("RemovedAt"), field("Ctime"), field("Title"), field("DeletedTs")]);
        let sql = SqlSynthesizer::new(&settings).synthesize(&m).unwrap();
        assert_eq!(sql.insert_columns, "`ctime`,`title`,`deleted_ts`");
        assert_eq!(sql.update_assignments, "`title`=:title,`deleted_ts`=:deleted_ts");
    }

    #[test]
    fn test_empty_insert_is_error() {
        let mut id = field("Id");
        id.is_primary = true;
        let err = SqlSynthesizer::default()
            .synthesize(&model(vec![id, field("DeletedTs")]))
            .unwrap_err();
        assert!(matches!(err, GenError::EmptyFragment { fragment: "insert", .. }));
    }

    #[test]
    fn test_empty_update_is_error() {
        let err = SqlSynthesizer::default()
            .synthesize(&model(vec![field("CreatedAt")]))
            .unwrap_err();
        assert!(matches!(err, GenError::EmptyFragment { fragment: "update", .. }));
    }

    #[test]
    fn test_no_fields_is_error() {
        assert!(SqlSynthesizer::default().synthesize(&model(vec![])).is_err());
    }

    #[test]
    fn test_primary_where_empty_without_primary() {
        assert_eq!(primary_where(&model(vec![field("Name")])), "");
    }
}
