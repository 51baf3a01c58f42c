//! Placeholder substitution
//!
//! Templates carry `${name}` markers. A [`Substitution`] owns one artifact's
//! text while its placeholders are filled in.

use crate::error::{GenError, Result};

/// `${import_prefix}`, filled in every template
pub const IMPORT_PREFIX: &str = "${import_prefix}";
/// `${service_api_prefix}`
pub const SERVICE_API_PREFIX: &str = "${service_api_prefix}";
/// `${const_list}`
pub const CONST_LIST: &str = "${const_list}";
/// `${import_list}`
pub const IMPORT_LIST: &str = "${import_list}";
/// `${type_define_list}`
pub const TYPE_DEFINE_LIST: &str = "${type_define_list}";
/// `${register_router_list}`
pub const REGISTER_ROUTER_LIST: &str = "${register_router_list}";
/// `${handler_api_define}`
pub const HANDLER_API_DEFINE: &str = "${handler_api_define}";
/// `${logic_api_define}`
pub const LOGIC_API_DEFINE: &str = "${logic_api_define}";
/// `${rpc_call_define}`
pub const RPC_CALL_DEFINE: &str = "${rpc_call_define}";
/// `${rpc_call_test_define}`
pub const RPC_CALL_TEST_DEFINE: &str = "${rpc_call_test_define}";
/// `${PROJ_NAME}`
pub const PROJ_NAME: &str = "${PROJ_NAME}";
/// `${readme}`
pub const README: &str = "${readme}";

/// Text of one artifact under substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    key: String,
    text: String,
}

impl Substitution {
    /// Start from a template text
    pub fn new(key: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: template.into(),
        }
    }

    /// Replace every occurrence of `placeholder` with `value`
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Template`] when the placeholder is absent.
    pub fn replace(&mut self, placeholder: &str, value: &str) -> Result<&mut Self> {
        if !self.text.contains(placeholder) {
            return Err(GenError::template(
                &self.key,
                format!("missing placeholder {placeholder}"),
            ));
        }
        self.text = self.text.replace(placeholder, value);
        Ok(self)
    }

    /// Like [`Substitution::replace`], with a line break inserted before `value`
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Template`] when the placeholder is absent.
    pub fn replace_with_line(&mut self, placeholder: &str, value: &str) -> Result<&mut Self> {
        self.replace(placeholder, &format!("\n{value}"))
    }

    /// Replace `placeholder` if present, leaving the text unchanged otherwise
    pub fn replace_optional(&mut self, placeholder: &str, value: &str) -> &mut Self {
        if self.text.contains(placeholder) {
            self.text = self.text.replace(placeholder, value);
        }
        self
    }

    /// Artifact key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Finish substitution
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}
