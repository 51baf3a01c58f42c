//! Model file rendering

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;
use crate::helpers::{CommentHelpers, NameHelpers};
use crate::metadata::{FieldDescriptor, ModelDescriptor, ModelStyle};
use crate::sql::{primary_where, SqlFragments, SqlSynthesizer};
use crate::templates::TemplateStore;

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Field data exposed to model templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelFieldContext {
    /// Go field name
    pub name: String,
    /// Column / document key
    pub column: String,
    /// Go type expression
    pub type_tag: String,
    /// Go parameter name for accessors
    pub param: String,
}

impl From<&FieldDescriptor> for ModelFieldContext {
    fn from(f: &FieldDescriptor) -> Self {
        let mut param = NameHelpers::lower_first_name(&f.name);
        if GO_KEYWORDS.contains(&param.as_str()) {
            param.push('_');
        }
        Self {
            name: f.name.clone(),
            column: f.column_name(),
            type_tag: f.type_tag.trim().to_string(),
            param,
        }
    }
}

/// Data a model template is rendered with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelContext {
    /// Go type name
    pub name: String,
    /// Doc comment lines
    pub doc: String,
    /// `snake_case` name
    pub snake_name: String,
    /// Name with a lowercase first letter
    pub lower_first_name: String,
    /// Receiver variable letter
    pub lower_first_letter: String,
    /// Quoted table or collection name
    pub name_sql: String,
    /// Statement fragments
    #[serde(flatten)]
    pub sql: SqlFragments,
    /// Primary key fields
    pub primary_fields: Vec<ModelFieldContext>,
    /// Unique fields
    pub unique_fields: Vec<ModelFieldContext>,
    /// `` `id`=:id AND ... ``, empty without primary key
    pub primary_where: String,
    /// A default primary key was synthesized
    pub is_default_primary: bool,
}

impl ModelContext {
    /// Build the context of a model
    ///
    /// # Errors
    ///
    /// Returns an error when the SQL fragments cannot be derived.
    pub fn new(model: &ModelDescriptor, sql: &SqlSynthesizer) -> Result<Self> {
        Ok(Self {
            name: model.name.clone(),
            doc: CommentHelpers::to_line_comments(&model.doc),
            snake_name: NameHelpers::to_snake_case(&model.name),
            lower_first_name: NameHelpers::lower_first_name(&model.name),
            lower_first_letter: NameHelpers::lower_first_letter(&model.name),
            name_sql: NameHelpers::to_name_sql(&model.name),
            sql: sql.synthesize(model)?,
            primary_fields: model.primary().into_iter().map(Into::into).collect(),
            unique_fields: model.unique().into_iter().map(Into::into).collect(),
            primary_where: primary_where(model),
            is_default_primary: model.is_default_primary,
        })
    }
}

/// Renders model files from the store's handlebars templates
pub struct ModelRenderer {
    handlebars: Handlebars<'static>,
}

impl std::fmt::Debug for ModelRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRenderer").finish_non_exhaustive()
    }
}

impl ModelRenderer {
    /// Compile the model templates of a store
    ///
    /// # Errors
    ///
    /// Returns [`GenError::TemplateParse`](crate::GenError::TemplateParse)
    /// when a template does not compile.
    pub fn new(store: &TemplateStore) -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Generating Go, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        for style in [ModelStyle::Relational, ModelStyle::Document] {
            handlebars.register_template_string(style.file_prefix(), store.model(style))?;
        }

        Ok(Self { handlebars })
    }

    /// Artifact key of a model file
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::generator::ModelRenderer;
    /// # use micro_gen::metadata::{ModelDescriptor, ModelStyle};
    /// let model = ModelDescriptor { name: "UserLog".into(), style: ModelStyle::Document, ..Default::default() };
    /// assert_eq!(ModelRenderer::key(&model), "logic/model/mongo_user_log.gen.go");
    /// ```
    #[must_use]
    pub fn key(model: &ModelDescriptor) -> String {
        format!(
            "logic/model/{}_{}.gen.go",
            model.style.file_prefix(),
            NameHelpers::to_snake_case(&model.name)
        )
    }

    /// Render the file of one model
    ///
    /// # Errors
    ///
    /// Returns an error when the SQL fragments cannot be derived or the
    /// template fails to render.
    pub fn render(&self, model: &ModelDescriptor, sql: &SqlSynthesizer) -> Result<String> {
        let context = ModelContext::new(model, sql)?;
        let text = self.handlebars.render(model.style.file_prefix(), &context)?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> ModelDescriptor {
        ModelDescriptor {
            name: "User".to_string(),
            doc: "// User user info\n".to_string(),
            is_default_primary: true,
            fields: vec![
                FieldDescriptor {
                    name: "Id".to_string(),
                    type_tag: "int64".to_string(),
                    is_primary: true,
                    ..FieldDescriptor::default()
                },
                FieldDescriptor {
                    name: "Email".to_string(),
                    type_tag: "string".to_string(),
                    is_unique: true,
                    ..FieldDescriptor::default()
                },
                FieldDescriptor {
                    name: "Type".to_string(),
                    type_tag: "int32".to_string(),
                    is_unique: true,
                    ..FieldDescriptor::default()
                },
                FieldDescriptor {
                    name: "CreatedAt".to_string(),
                    type_tag: "int64".to_string(),
                    ..FieldDescriptor::default()
                },
            ],
            ..ModelDescriptor::default()
        }
    }

    #[test]
    fn test_context() {
        let ctx = ModelContext::new(&user(), &SqlSynthesizer::default()).unwrap();
        assert_eq!(ctx.name_sql, "`user`");
        assert_eq!(ctx.lower_first_letter, "u");
        assert_eq!(ctx.primary_where, "`id`=:id");
        assert_eq!(ctx.unique_fields[0].param, "email");
        assert_eq!(ctx.unique_fields[1].param, "type_");
        assert_eq!(ctx.sql.update_assignments, "`email`=:email,`type`=:type");
    }

    #[test]
    fn test_context_serializes_flat() {
        let ctx = ModelContext::new(&user(), &SqlSynthesizer::default()).unwrap();
        let value = serde_json::to_value(&ctx).unwrap();
        assert!(value.get("insert_columns").is_some());
        assert!(value.get("sql").is_none());
    }

    #[test]
    fn test_render_mysql() {
        let renderer = ModelRenderer::new(&TemplateStore::builtin()).unwrap();
        let text = renderer.render(&user(), &SqlSynthesizer::default()).unwrap();

        assert!(text.contains("// User user info\ntype User = args.User\n"));
        assert!(text.contains(
            "query := \"INSERT INTO `user` (`email`,`type`,`created_at`) VALUES (:email,:type,:created_at);\""
        ));
        assert!(text.contains("ON DUPLICATE KEY UPDATE `email`=VALUES(`email`),`type`=VALUES(`type`);\""));
        assert!(text.contains("WHERE `id`=:id LIMIT 1;"));
        assert!(text.contains("func GetUserByEmail(email string) (*User, bool, error) {"));
        assert!(text.contains("func GetUserByType(type_ int32) (*User, bool, error) {"));
        assert!(text.contains("_u.Id, err = r.LastInsertId()"));
        assert!(text.contains("args.UserSql"));
    }

    #[test]
    fn test_render_mongo() {
        let mut model = user();
        model.style = ModelStyle::Document;
        let renderer = ModelRenderer::new(&TemplateStore::builtin()).unwrap();
        let text = renderer.render(&model, &SqlSynthesizer::default()).unwrap();

        assert!(text.contains("const UserCollection = \"user\""));
        assert!(text.contains("\"id\": _u.Id,"));
        assert!(text.contains("case mgo.ErrNotFound:"));
    }

    #[test]
    fn test_broken_override_fails() {
        let mut store = TemplateStore::builtin();
        store.set(crate::templates::MYSQL_MODEL_KEY, "{{#if}}").unwrap();
        assert!(ModelRenderer::new(&store).is_err());
    }

    #[test]
    fn test_empty_model_fails() {
        let renderer = ModelRenderer::new(&TemplateStore::builtin()).unwrap();
        let model = ModelDescriptor {
            name: "Empty".to_string(),
            ..ModelDescriptor::default()
        };
        assert!(renderer.render(&model, &SqlSynthesizer::default()).is_err());
    }
}
