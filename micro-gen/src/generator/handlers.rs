//! Router, handler, logic and SDK emission
//!
//! Every emitter reads the same [`HandlerSymbols`], computed once per
//! handler, so the router entry, the handler function, the logic stub and
//! the SDK wrapper always spell a handler and its types identically.

use crate::helpers::{CommentHelpers, NameHelpers};
use crate::metadata::{HandlerDescriptor, HandlerKind};

/// Identifiers of one handler, shared by all emitters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSymbols {
    /// Go function name (`fullName`)
    pub full_name: String,
    /// Argument type, without package or pointer
    pub arg_type: String,
    /// Result type, without package or pointer
    pub result_type: String,
    /// Handler kind
    pub kind: HandlerKind,
    /// Full URI including the project root segment
    pub uri: String,
    /// Doc comment lines, each ending with a newline
    pub doc: String,
    /// Sub-router segment for grouped handlers
    pub group: Option<String>,
}

impl HandlerSymbols {
    /// Derive the symbols of a handler
    #[must_use]
    pub fn new(handler: &HandlerDescriptor, project_name: &str) -> Self {
        let group = Some(handler.group.name.trim())
            .filter(|g| !g.is_empty())
            .map(NameHelpers::to_snake_case);
        Self {
            full_name: handler.full_name.clone(),
            arg_type: bare_type(&handler.arg_type),
            result_type: bare_type(&handler.result_type),
            kind: handler.kind(),
            uri: NameHelpers::to_uri(project_name, &handler.uri),
            doc: CommentHelpers::to_line_comments(&handler.doc),
            group,
        }
    }

    fn ctx_type(&self) -> &'static str {
        match self.kind {
            HandlerKind::Pull => "tp.PullCtx",
            HandlerKind::Push => "tp.PushCtx",
        }
    }

    fn returns(&self) -> String {
        match self.kind {
            HandlerKind::Pull => format!("(*args.{}, *tp.Rerror)", self.result_type),
            HandlerKind::Push => "*tp.Rerror".to_string(),
        }
    }

    /// Go signature shared by the handler and the logic stub
    #[must_use]
    pub fn server_signature(&self) -> String {
        format!(
            "func {}(ctx {}, arg *args.{}) {}",
            self.full_name,
            self.ctx_type(),
            self.arg_type,
            self.returns()
        )
    }

    /// Go signature of the SDK wrapper
    #[must_use]
    pub fn client_signature(&self) -> String {
        format!(
            "func {}(arg *args.{}, setting ...socket.PacketSetting) {}",
            self.full_name,
            self.arg_type,
            self.returns()
        )
    }
}

/// Strip pointer markers and the `args.` package qualifier
fn bare_type(name: &str) -> String {
    let name = name.trim().trim_start_matches('*');
    name.strip_prefix("args.").unwrap_or(name).to_string()
}

/// Router registrations, one line per handler
///
/// Grouped handlers are registered on a sub-router declared before its first
/// use.
#[must_use]
pub fn register_router_list(symbols: &[HandlerSymbols]) -> String {
    let mut declared: Vec<&str> = Vec::new();
    let mut lines = Vec::new();

    for s in symbols {
        let router = match &s.group {
            Some(group) => {
                let var = format!("_{group}");
                if !declared.contains(&group.as_str()) {
                    declared.push(group.as_str());
                    lines.push(format!("\t{var} := _group.SubRoute(\"{group}\")"));
                }
                var
            }
            None => "_group".to_string(),
        };
        let method = match s.kind {
            HandlerKind::Pull => "RoutePullFunc",
            HandlerKind::Push => "RoutePushFunc",
        };
        lines.push(format!("\t{router}.{method}({})", s.full_name));
    }

    lines.join("\n")
}

/// Handler functions of one kind, forwarding to the logic layer
#[must_use]
pub fn handler_api_define(symbols: &[HandlerSymbols], kind: HandlerKind) -> String {
    symbols
        .iter()
        .filter(|s| s.kind == kind)
        .map(|s| {
            format!(
                "{}{} {{\n\treturn logic.{}(ctx, arg)\n}}\n",
                s.doc,
                s.server_signature(),
                s.full_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Temporary logic stubs returning zero values
#[must_use]
pub fn logic_api_define(symbols: &[HandlerSymbols]) -> String {
    symbols
        .iter()
        .map(|s| {
            let body = match s.kind {
                HandlerKind::Pull => format!("return new(args.{}), nil", s.result_type),
                HandlerKind::Push => "return nil".to_string(),
            };
            format!("{}{} {{\n\t{body}\n}}\n", s.doc, s.server_signature())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// SDK wrappers calling the handler URI
#[must_use]
pub fn rpc_call_define(symbols: &[HandlerSymbols]) -> String {
    symbols
        .iter()
        .map(|s| {
            let body = match s.kind {
                HandlerKind::Pull => format!(
                    "\tresult := new(args.{})\n\
                     \trerr := client.Pull(\"{}\", arg, result, setting...).Rerror()\n\
                     \treturn result, rerr\n",
                    s.result_type, s.uri
                ),
                HandlerKind::Push => {
                    format!("\treturn client.Push(\"{}\", arg, setting...)\n", s.uri)
                }
            };
            format!("{}{} {{\n{body}}}\n", s.doc, s.client_signature())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// SDK usage snippets, one block per handler
#[must_use]
pub fn rpc_call_test_define(symbols: &[HandlerSymbols]) -> String {
    symbols
        .iter()
        .map(|s| {
            let name = &s.full_name;
            let arg = &s.arg_type;
            match s.kind {
                HandlerKind::Pull => format!(
                    "\t{{\n\
                     \t\tresult, rerr := {name}(new(args.{arg}))\n\
                     \t\tif rerr != nil {{\n\
                     \t\t\ttp.Errorf(\"{name}: rerr: %v\", rerr)\n\
                     \t\t}} else {{\n\
                     \t\t\ttp.Infof(\"{name}: result: %#v\", result)\n\
                     \t\t}}\n\
                     \t}}"
                ),
                HandlerKind::Push => format!(
                    "\t{{\n\
                     \t\trerr := {name}(new(args.{arg}))\n\
                     \t\tif rerr != nil {{\n\
                     \t\t\ttp.Errorf(\"{name}: rerr: %v\", rerr)\n\
                     \t\t}}\n\
                     \t}}"
                ),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::HandlerGroup;

    fn handler(name: &str, group: &str, kind: HandlerKind) -> HandlerDescriptor {
        HandlerDescriptor {
            full_name: name.to_string(),
            uri: format!("/{}", NameHelpers::to_snake_case(name)),
            doc: format!("// {name} does things\n"),
            arg_type: format!("{name}Arg"),
            result_type: format!("*args.{name}Result"),
            group: HandlerGroup {
                name: group.to_string(),
                kind,
            },
        }
    }

    fn symbols() -> Vec<HandlerSymbols> {
        [
            handler("Home", "", HandlerKind::Pull),
            handler("Math_Divide", "Math", HandlerKind::Pull),
            handler("Stat", "", HandlerKind::Push),
            handler("Math_Add", "Math", HandlerKind::Pull),
        ]
        .iter()
        .map(|h| HandlerSymbols::new(h, "Demo"))
        .collect()
    }

    #[test]
    fn test_symbols() {
        let s = &symbols()[1];
        assert_eq!(s.result_type, "Math_DivideResult");
        assert_eq!(s.uri, "/demo/math_divide");
        assert_eq!(s.group.as_deref(), Some("math"));
    }

    #[test]
    fn test_router_list_declares_group_once() {
        assert_eq!(
            register_router_list(&symbols()),
            "\t_group.RoutePullFunc(Home)\n\
             \t_math := _group.SubRoute(\"math\")\n\
             \t_math.RoutePullFunc(Math_Divide)\n\
             \t_group.RoutePushFunc(Stat)\n\
             \t_math.RoutePullFunc(Math_Add)"
        );
    }

    #[test]
    fn test_handler_define_filters_kind() {
        let push = handler_api_define(&symbols(), HandlerKind::Push);
        assert_eq!(
            push,
            "// Stat does things\n\
             func Stat(ctx tp.PushCtx, arg *args.StatArg) *tp.Rerror {\n\
             \treturn logic.Stat(ctx, arg)\n}\n"
        );
        assert!(handler_api_define(&symbols(), HandlerKind::Pull).contains("func Math_Add("));
    }

    #[test]
    fn test_logic_stubs() {
        let logic = logic_api_define(&symbols());
        assert!(logic.contains(
            "func Home(ctx tp.PullCtx, arg *args.HomeArg) (*args.HomeResult, *tp.Rerror) {\n\
             \treturn new(args.HomeResult), nil\n}\n"
        ));
        assert!(logic.contains("func Stat(ctx tp.PushCtx, arg *args.StatArg) *tp.Rerror {\n\treturn nil\n}\n"));
    }

    #[test]
    fn test_sdk_wrappers() {
        let sdk = rpc_call_define(&symbols());
        assert!(sdk.contains(
            "func Home(arg *args.HomeArg, setting ...socket.PacketSetting) (*args.HomeResult, *tp.Rerror) {\n\
             \tresult := new(args.HomeResult)\n\
             \trerr := client.Pull(\"/demo/home\", arg, result, setting...).Rerror()\n\
             \treturn result, rerr\n}\n"
        ));
        assert!(sdk.contains("\treturn client.Push(\"/demo/stat\", arg, setting...)\n"));
    }

    #[test]
    fn test_sdk_snippets() {
        let snippets = rpc_call_test_define(&symbols());
        assert!(snippets.contains("result, rerr := Home(new(args.HomeArg))"));
        assert!(snippets.contains("tp.Infof(\"Home: result: %#v\", result)"));
        assert!(snippets.contains("rerr := Stat(new(args.StatArg))"));
    }
}
