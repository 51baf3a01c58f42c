//! Regeneration policy and banner table
//!
//! Every artifact key maps to a [`RegenerationPolicy`] and a [`Banner`]
//! through [`FILE_POLICIES`]. Keys missing from the table (model files) are
//! regenerable and carry the generated banner.

/// How the file writer treats an existing file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegenerationPolicy {
    /// Rewritten on every run
    AlwaysOverwrite,
    /// Written on first generation or when forced, hand-edited afterwards
    ScaffoldOnce,
}

/// Header prepended to a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Banner {
    /// No header
    None,
    /// "generated, do not edit"
    Generated,
    /// Marks temporary placeholder code
    Temporary,
}

impl Banner {
    /// Banner text for a given tool name, including the blank separator line
    ///
    /// # Examples
    ///
    /// ```
    /// # use micro_gen::templates::Banner;
    /// assert_eq!(
    ///     Banner::Generated.render("micro gen"),
    ///     "// Code generated by 'micro gen' command.\n// DO NOT EDIT!\n\n"
    /// );
    /// assert_eq!(Banner::None.render("micro gen"), "");
    /// ```
    #[must_use]
    pub fn render(self, tool: &str) -> String {
        match self {
            Self::None => String::new(),
            Self::Generated => {
                format!("// Code generated by '{tool}' command.\n// DO NOT EDIT!\n\n")
            }
            Self::Temporary => format!(
                "// Code generated by '{tool}' command.\n\
                 // The temporary code used to ensure successful compilation!\n\
                 // When the project is completed, it should be removed!\n\n"
            ),
        }
    }
}

/// One row of the policy table
#[derive(Debug, Clone, Copy)]
pub struct FilePolicy {
    /// Artifact key (relative path)
    pub key: &'static str,
    /// Regeneration policy
    pub policy: RegenerationPolicy,
    /// Header
    pub banner: Banner,
    /// Placeholders a template for this key must contain
    pub placeholders: &'static [&'static str],
}

const fn scaffold(key: &'static str, placeholders: &'static [&'static str]) -> FilePolicy {
    FilePolicy {
        key,
        policy: RegenerationPolicy::ScaffoldOnce,
        banner: Banner::None,
        placeholders,
    }
}

const fn generated(key: &'static str, placeholders: &'static [&'static str]) -> FilePolicy {
    FilePolicy {
        key,
        policy: RegenerationPolicy::AlwaysOverwrite,
        banner: Banner::Generated,
        placeholders,
    }
}

/// Template-backed artifacts
pub const FILE_POLICIES: &[FilePolicy] = &[
    scaffold("main.go", &["${import_prefix}", "${service_api_prefix}"]),
    scaffold("config.go", &["${service_api_prefix}"]),
    scaffold(".gitignore", &[]),
    scaffold("args/const.go", &[]),
    scaffold("args/var.go", &[]),
    scaffold("args/type.go", &[]),
    scaffold("api/handler.go", &[]),
    scaffold("api/router.go", &[]),
    scaffold("sdk/rpc.go", &[]),
    scaffold("sdk/rpc_test.go", &[]),
    scaffold("logic/model/init.go", &["${import_prefix}"]),
    generated("args/const.gen.go", &["${const_list}"]),
    generated("args/type.gen.go", &["${import_list}", "${type_define_list}"]),
    generated("api/router.gen.go", &["${register_router_list}"]),
    generated("api/pull_handler.gen.go", &["${handler_api_define}"]),
    generated("api/push_handler.gen.go", &["${handler_api_define}"]),
    FilePolicy {
        key: "logic/tmp_code.gen.go",
        policy: RegenerationPolicy::AlwaysOverwrite,
        banner: Banner::Temporary,
        placeholders: &["${logic_api_define}"],
    },
    generated("sdk/rpc.gen.go", &["${rpc_call_define}"]),
    generated("sdk/rpc.gen_test.go", &["${rpc_call_test_define}"]),
];

/// Look up the table row for a key
#[must_use]
pub fn lookup(key: &str) -> Option<&'static FilePolicy> {
    FILE_POLICIES.iter().find(|p| p.key == key)
}

/// Regeneration policy of any artifact key
#[must_use]
pub fn policy_for(key: &str) -> RegenerationPolicy {
    lookup(key).map_or(RegenerationPolicy::AlwaysOverwrite, |p| p.policy)
}

/// Banner of any artifact key
#[must_use]
pub fn banner_for(key: &str) -> Banner {
    lookup(key).map_or(Banner::Generated, |p| p.banner)
}
