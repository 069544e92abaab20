use minijinja::{Environment, UndefinedBehavior, Value, context};
use routegen_core::indent_lines;
use serde::Serialize;

use super::{TemplateRegistry, TemplateSpec};
use crate::{GenerateError, Result, route::RouteNode};

/// Variable name the router object is bound to inside `Register`.
pub const ROOT_VAR: &str = "r";

/// Renders registry templates against serializable contexts.
///
/// Rendering is pure: the renderer never touches the file system and the
/// same registry and context always produce the same text.
pub struct TemplateRenderer<'r> {
    registry: &'r TemplateRegistry,
}

impl<'r> TemplateRenderer<'r> {
    pub fn new(registry: &'r TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r TemplateRegistry {
        self.registry
    }

    fn spec(&self, name: &str) -> Result<&'r TemplateSpec> {
        self.registry.get(name).ok_or_else(|| GenerateError::Render {
            template: name.to_string(),
            message: "template is not registered".to_string(),
        })
    }

    /// Build an engine for `name`.
    ///
    /// The environment uses the template's delimiters and also holds every
    /// other registered template with the same delimiter pair, so those can
    /// be pulled in with `{% include %}`.
    pub fn environment(&self, name: &str) -> Result<Environment<'r>> {
        let spec = self.spec(name)?;
        let syntax = spec
            .syntax()
            .map_err(|err| GenerateError::render(name, err))?;

        let mut env = strict_environment();
        env.set_syntax(syntax);

        for other in self.registry.iter().filter(|t| t.delims == spec.delims) {
            env.add_template(other.name.as_str(), other.body.as_str())
                .map_err(|err| GenerateError::render(other.name.as_str(), err))?;
        }
        Ok(env)
    }

    /// Render the body of template `name`.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String> {
        let env = self.environment(name)?;
        let template = env
            .get_template(name)
            .map_err(|err| GenerateError::render(name, err))?;
        template
            .render(context)
            .map_err(|err| GenerateError::render(name, err))
    }

    /// Render the output path of template `name`.
    ///
    /// Path patterns always use the default delimiters. Returns `Ok(None)`
    /// for partials.
    pub fn render_path<S: Serialize>(&self, name: &str, context: S) -> Result<Option<String>> {
        let spec = self.spec(name)?;
        let Some(pattern) = &spec.path else {
            return Ok(None);
        };

        let path = strict_environment()
            .render_str(pattern, context)
            .map_err(|err| GenerateError::render(name, err))?;
        let path = path.trim();

        if path.is_empty() || path.starts_with('/') || path.contains("..") {
            return Err(GenerateError::Render {
                template: name.to_string(),
                message: format!("output path '{path}' must be a non-empty relative path"),
            });
        }
        Ok(Some(path.to_string()))
    }

    /// Render a route tree with the fragment template `node_template`.
    ///
    /// Each node's fragment is rendered with `node`, `parent_var` (the group
    /// variable it registers on), `var` (its own group variable) and
    /// `children` (the already rendered child fragments, indented one tab),
    /// plus every field of `globals`. The root is bound to [`ROOT_VAR`] and
    /// its children register directly on it.
    ///
    /// Returns the fragments indented one tab, ready to be placed in a
    /// function body.
    pub fn render_tree<S: Serialize>(
        &self,
        node_template: &str,
        root: &RouteNode,
        globals: S,
    ) -> Result<String> {
        let env = self.environment(node_template)?;
        let template = env
            .get_template(node_template)
            .map_err(|err| GenerateError::render(node_template, err))?;
        let globals = Value::from_serialize(&globals);

        let render = |node: &RouteNode, parent_var: &str, var: &str, children: String| {
            template
                .render(context! {
                    node => Value::from_serialize(node),
                    parent_var,
                    var,
                    children,
                    ..globals.clone()
                })
                .map(|out| out.trim_matches('\n').to_string())
                .map_err(|err| GenerateError::render(node_template, err))
        };

        let mut parts = vec![render(root, ROOT_VAR, ROOT_VAR, String::new())?];
        for child in &root.children {
            parts.push(render_subtree(child, ROOT_VAR, &render)?);
        }

        let routes = join_fragments(parts);
        Ok(indent_lines(&routes, "\t"))
    }
}

fn render_subtree<F>(node: &RouteNode, parent_var: &str, render: &F) -> Result<String>
where
    F: Fn(&RouteNode, &str, &str, String) -> Result<String>,
{
    let var = node.group_name.as_deref().unwrap_or(parent_var);
    let children = node
        .children
        .iter()
        .map(|child| render_subtree(child, var, render))
        .collect::<Result<Vec<_>>>()?;
    let children = indent_lines(&join_fragments(children), "\t");

    tracing::trace!(path = %node.path, var, "rendering route node");
    render(node, parent_var, var, children)
}

fn join_fragments(parts: Vec<String>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strict_environment<'s>() -> Environment<'s> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env
}

#[cfg(test)]
mod tests {
    use routegen_ir::{HttpMethod, OperationDescriptor};

    use super::*;
    use crate::route::RouteTreeBuilder;

    fn users_tree() -> RouteNode {
        RouteTreeBuilder::build(&[
            OperationDescriptor::new(HttpMethod::Get, "/users", "ListUsers"),
            OperationDescriptor::new(HttpMethod::Get, "/users/:id", "GetUser"),
            OperationDescriptor::new(HttpMethod::Post, "/users", "CreateUser"),
        ])
        .unwrap()
    }

    #[test]
    fn test_render_strict_undefined() {
        let mut registry = TemplateRegistry::new();
        registry.register(TemplateSpec::new("greeting", "hello {{ name }}"));
        let renderer = TemplateRenderer::new(&registry);

        assert_eq!(
            renderer.render("greeting", context! { name => "gopher" }).unwrap(),
            "hello gopher"
        );

        let err = renderer.render("greeting", context! {}).unwrap_err();
        assert!(matches!(err, GenerateError::Render { template, .. } if template == "greeting"));
    }

    #[test]
    fn test_render_unknown_template() {
        let registry = TemplateRegistry::new();
        let err = TemplateRenderer::new(&registry)
            .render("missing", context! {})
            .unwrap_err();
        assert!(err.to_string().contains("not registered"));
    }

    #[test]
    fn test_custom_delimiters_leave_braces_alone() {
        let mut registry = TemplateRegistry::new();
        registry.register(
            TemplateSpec::new("go", "func [[ name ]]() {}\n[% if ok %]ok[% endif %]").delims("[[", "]]"),
        );
        let out = TemplateRenderer::new(&registry)
            .render("go", context! { name => "Ping", ok => true })
            .unwrap();
        // Block tags keep the `{% %}` syntax, so `[% %]` is plain text.
        assert_eq!(out, "func Ping() {}\n[% if ok %]ok[% endif %]");
    }

    #[test]
    fn test_percent_delimiters_move_blocks() {
        let mut registry = TemplateRegistry::new();
        registry.register(
            TemplateSpec::new("t", "{% name %}<% if ok %>!<% endif %>").delims("{%", "%}"),
        );
        let out = TemplateRenderer::new(&registry)
            .render("t", context! { name => "x", ok => true })
            .unwrap();
        assert_eq!(out, "x!");
    }

    #[test]
    fn test_include_shares_delimiters() {
        let mut registry = TemplateRegistry::new();
        registry.register(TemplateSpec::new("header", "// [[ service ]]").delims("[[", "]]"));
        registry.register(
            TemplateSpec::new("main", "{% include \"header\" %}\npackage x\n").delims("[[", "]]"),
        );
        let out = TemplateRenderer::new(&registry)
            .render("main", context! { service => "Demo" })
            .unwrap();
        assert_eq!(out, "// Demo\npackage x\n");
    }

    #[test]
    fn test_render_path() {
        let registry = TemplateRegistry::with_defaults();
        let renderer = TemplateRenderer::new(&registry);
        let ctx = context! { handler_package => "demo", service_file => "demo_service" };

        assert_eq!(
            renderer.render_path("handler", &ctx).unwrap().as_deref(),
            Some("biz/handler/demo/demo_service.go")
        );
        assert_eq!(renderer.render_path("route_node", &ctx).unwrap(), None);
    }

    #[test]
    fn test_render_path_rejects_escaping_paths() {
        let mut registry = TemplateRegistry::new();
        registry.register(TemplateSpec::new("abs", "x").path("/etc/{{ name }}"));
        registry.register(TemplateSpec::new("up", "x").path("../{{ name }}"));
        registry.register(TemplateSpec::new("empty", "x").path("{{ name }}"));
        let renderer = TemplateRenderer::new(&registry);

        for name in ["abs", "up"] {
            assert!(renderer.render_path(name, context! { name => "x" }).is_err());
        }
        assert!(renderer.render_path("empty", context! { name => "" }).is_err());
    }

    #[test]
    fn test_render_tree_groups_users() {
        let registry = TemplateRegistry::with_defaults();
        let renderer = TemplateRenderer::new(&registry);

        let routes = renderer
            .render_tree("route_node", &users_tree(), context! { handler_package => "demo" })
            .unwrap();

        assert_eq!(
            routes,
            "\tr.GET(\"/users\", append(_listusersMw(), demo.ListUsers)...)\n\
             \tr.POST(\"/users\", append(_createuserMw(), demo.CreateUser)...)\n\
             \t{\n\
             \t\t_users := r.Group(\"/users\", _usersMw()...)\n\
             \t\t_users.GET(\"/:id\", append(_getuserMw(), demo.GetUser)...)\n\
             \t}"
        );
    }

    #[test]
    fn test_render_tree_root_handler_and_nesting() {
        let tree = RouteTreeBuilder::build(&[
            OperationDescriptor::new(HttpMethod::Any, "/", "Index"),
            OperationDescriptor::new(HttpMethod::Get, "/api/v1/ping", "Ping"),
        ])
        .unwrap();

        let registry = TemplateRegistry::with_defaults();
        let routes = TemplateRenderer::new(&registry)
            .render_tree("route_node", &tree, context! { handler_package => "demo" })
            .unwrap();

        assert_eq!(
            routes,
            "\tr.Any(\"/\", append(_indexMw(), demo.Index)...)\n\
             \t{\n\
             \t\t_api := r.Group(\"/api\", _apiMw()...)\n\
             \t\t{\n\
             \t\t\t_v1 := _api.Group(\"/v1\", _v1Mw()...)\n\
             \t\t\t_v1.GET(\"/ping\", append(_pingMw(), demo.Ping)...)\n\
             \t\t}\n\
             \t}"
        );
    }

    #[test]
    fn test_render_tree_empty() {
        let registry = TemplateRegistry::with_defaults();
        let routes = TemplateRenderer::new(&registry)
            .render_tree(
                "route_node",
                &RouteTreeBuilder::build(&[]).unwrap(),
                context! { handler_package => "demo" },
            )
            .unwrap();
        assert_eq!(routes, "");
    }
}
