//! Naming and comment helpers shared by every emitter
//!
//! All identifier derivations (column names, table names, receiver letters,
//! URIs) go through this module so that every artifact of a run spells a
//! given symbol the same way.

use inflector::Inflector;

/// Naming helpers for code generation
pub struct NameHelpers;

impl NameHelpers {
    /// Convert string to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::helpers::NameHelpers;
    /// assert_eq!(NameHelpers::to_snake_case("UserProfile"), "user_profile");
    /// assert_eq!(NameHelpers::to_snake_case("HTTPRequest"), "http_request");
    /// ```
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Lowercase the first character, keep the rest
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::helpers::NameHelpers;
    /// assert_eq!(NameHelpers::lower_first_name("UserProfile"), "userProfile");
    /// assert_eq!(NameHelpers::lower_first_name(""), "");
    /// ```
    #[must_use]
    pub fn lower_first_name(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_lowercase().chain(chars).collect()
        })
    }

    /// The lowercased first character, used as a Go receiver name
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::helpers::NameHelpers;
    /// assert_eq!(NameHelpers::lower_first_letter("User"), "u");
    /// ```
    #[must_use]
    pub fn lower_first_letter(input: &str) -> String {
        input
            .chars()
            .next()
            .map(|c| c.to_lowercase().collect())
            .unwrap_or_default()
    }

    /// Quoted table or collection name (`` `snake_case` ``)
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::helpers::NameHelpers;
    /// assert_eq!(NameHelpers::to_name_sql("UserProfile"), "`user_profile`");
    /// ```
    #[must_use]
    pub fn to_name_sql(model: &str) -> String {
        format!("`{}`", Self::to_snake_case(model))
    }

    /// Full handler URI: project root segment joined with the handler suffix
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::helpers::NameHelpers;
    /// assert_eq!(NameHelpers::to_uri("MyService", "/math/divide"), "/my_service/math/divide");
    /// assert_eq!(NameHelpers::to_uri("MyService", "stat"), "/my_service/stat");
    /// assert_eq!(NameHelpers::to_uri("MyService", ""), "/my_service");
    /// ```
    #[must_use]
    pub fn to_uri(project: &str, suffix: &str) -> String {
        let mut uri = format!("/{}", Self::to_snake_case(project));
        for segment in suffix.split('/').filter(|s| !s.is_empty()) {
            uri.push('/');
            uri.push_str(segment);
        }
        uri
    }
}

/// Helpers for raw source comments (`// ...` lines)
pub struct CommentHelpers;

impl CommentHelpers {
    /// Normalise raw comment text into Go line comments, one per line,
    /// each terminated by a newline. Empty input yields an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::helpers::CommentHelpers;
    /// assert_eq!(CommentHelpers::to_line_comments("Divide two numbers"), "// Divide two numbers\n");
    /// assert_eq!(CommentHelpers::to_line_comments("// a\n// b\n"), "// a\n// b\n");
    /// assert_eq!(CommentHelpers::to_line_comments("  "), "");
    /// ```
    #[must_use]
    pub fn to_line_comments(raw: &str) -> String {
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                if line.starts_with("//") {
                    format!("{line}\n")
                } else {
                    format!("// {line}\n")
                }
            })
            .collect()
    }

    /// Strip comment markers and join lines into one whitespace-trimmed line
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::helpers::CommentHelpers;
    /// assert_eq!(CommentHelpers::plain_text("// user id\n// unique\n"), "user id unique");
    /// assert_eq!(CommentHelpers::plain_text("  nickname "), "nickname");
    /// ```
    #[must_use]
    pub fn plain_text(raw: &str) -> String {
        raw.lines()
            .map(|line| line.trim().trim_start_matches("//").trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Convert line comments into markdown text with `<br>` line breaks
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::helpers::CommentHelpers;
    /// assert_eq!(CommentHelpers::to_html("// Divide two numbers\n"), "Divide two numbers\n");
    /// assert_eq!(CommentHelpers::to_html("// a\n// b\n"), "a\n<br>b\n");
    /// ```
    #[must_use]
    pub fn to_html(raw: &str) -> String {
        let text = raw.replace("// ", "<br>");
        let mut rest = text.as_str();
        while let Some(stripped) = rest.strip_prefix("<br>") {
            rest = stripped;
        }
        rest.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(NameHelpers::to_snake_case("UserProfile"), "user_profile");
        assert_eq!(NameHelpers::to_snake_case("simple"), "simple");
        assert_eq!(NameHelpers::to_snake_case("CreatedAt"), "created_at");
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(NameHelpers::lower_first_name("Order"), "order");
        assert_eq!(NameHelpers::lower_first_letter("Order"), "o");
        assert_eq!(NameHelpers::lower_first_letter(""), "");
    }

    #[test]
    fn test_name_sql() {
        assert_eq!(NameHelpers::to_name_sql("Order"), "`order`");
    }

    #[test]
    fn test_uri_collapses_slashes() {
        assert_eq!(NameHelpers::to_uri("Demo", "//a//b/"), "/demo/a/b");
    }

    #[test]
    fn test_line_comments_keep_existing_markers() {
        assert_eq!(
            CommentHelpers::to_line_comments("//no space\nplain"),
            "//no space\n// plain\n"
        );
    }

    #[test]
    fn test_plain_text_empty() {
        assert_eq!(CommentHelpers::plain_text(""), "");
        assert_eq!(CommentHelpers::plain_text("//\n//"), "");
    }

    #[test]
    fn test_to_html_keeps_letters_after_break() {
        // only whole "<br>" prefixes are removed
        assert_eq!(CommentHelpers::to_html("// bar"), "bar");
    }
}
