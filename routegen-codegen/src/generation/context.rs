//! Data handed to every template.
//!
//! One [`RenderContext`] is built per run and shared by all output
//! templates, so every file sees the same tree and the same derived names.

use indexmap::IndexSet;
use routegen_ir::ParamLocation;
use routegen_manifest::ProjectConfig;
use serde::Serialize;

use crate::{
    Result,
    merge::INSERT_POINT,
    route::{RouteHandler, RouteNode},
    template::TemplateRenderer,
};

/// Name of the partial used to render one route node.
pub const ROUTE_NODE_TEMPLATE: &str = "route_node";

/// Project-level names, available at the top level of every template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    pub module: String,
    pub service: String,
    /// snake_case file stem derived from `service`.
    pub service_file: String,
    pub handler_package: String,
    pub router_package: String,
    pub model_package: String,
    pub base_domain: String,
}

impl ProjectInfo {
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            module: config.module.clone(),
            service: config.service.clone(),
            service_file: config.service_file(),
            handler_package: config.handler_package().to_string(),
            router_package: config.router_package().to_string(),
            model_package: config.model_package().to_string(),
            base_domain: config.base_domain().to_string(),
        }
    }

    /// Qualify a type name with its model package.
    ///
    /// Names that already carry a package qualifier are returned unchanged.
    pub fn qualify(&self, type_name: &str) -> String {
        if type_name.contains('.') {
            type_name.to_string()
        } else {
            format!("{}.{}", self.model_package, type_name)
        }
    }
}

/// Generator switches exposed to templates as `config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratorConfig {
    pub query_enum_as_int: bool,
}

/// A generated handler function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodInfo {
    pub name: String,
    /// Complete `//` comment block placed above the function.
    pub comment: String,
    pub request_type: Option<String>,
    pub response_type: Option<String>,
    /// Response serializer method on the request context.
    pub serializer: String,
    /// Upper-case HTTP method.
    pub method: String,
    pub path: String,
}

/// A parameter set by a generated client method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientParam {
    pub name: String,
    pub field: String,
}

/// A generated IDL client method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientMethodInfo {
    pub name: String,
    pub request_type: String,
    pub response_type: String,
    /// Verb sent on the wire; the wildcard method is sent as `POST`.
    pub method: String,
    pub path: String,
    pub query: Vec<ClientParam>,
    pub path_params: Vec<ClientParam>,
    pub headers: Vec<ClientParam>,
    pub form: Vec<ClientParam>,
    pub files: Vec<ClientParam>,
    /// Expression passed as the request body.
    pub body: Option<String>,
}

/// A Go import with an explicit alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImportSpec {
    pub alias: String,
    pub path: String,
}

/// Everything templates can refer to.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    #[serde(flatten)]
    pub project: ProjectInfo,
    /// The route tree.
    pub router: RouteNode,
    /// Route registrations rendered with the `route_node` partial, empty
    /// when no such partial is registered.
    pub routes: String,
    /// Middleware hook names in tree order, each listed once.
    pub middlewares: Vec<String>,
    pub methods: Vec<MethodInfo>,
    pub client_methods: Vec<ClientMethodInfo>,
    /// Model packages referenced by handler request and response types.
    pub imports: Vec<ImportSpec>,
    /// Model packages referenced by client methods.
    pub client_imports: Vec<ImportSpec>,
    pub config: GeneratorConfig,
    /// Insertion marker line for aggregator templates.
    pub insert_point: &'static str,
}

impl RenderContext {
    /// Derive the context for `router`, rendering its routes with `renderer`.
    pub fn build(
        project: ProjectInfo,
        config: GeneratorConfig,
        router: RouteNode,
        renderer: &TemplateRenderer<'_>,
    ) -> Result<Self> {
        let routes = if renderer.registry().contains(ROUTE_NODE_TEMPLATE) {
            renderer.render_tree(ROUTE_NODE_TEMPLATE, &router, &project)?
        } else {
            String::new()
        };

        let mut middlewares: IndexSet<String> = IndexSet::new();
        let mut methods = Vec::new();
        let mut client_methods = Vec::new();
        let mut packages: IndexSet<String> = IndexSet::new();
        let mut client_packages: IndexSet<String> = IndexSet::new();

        for node in router.walk() {
            if !node.is_root()
                && node.has_children()
                && let Some(tag) = &node.group_middleware
            {
                middlewares.insert(tag.clone());
            }

            for handler in &node.handlers {
                middlewares.insert(handler.middleware.clone());

                let request = handler.request_type.as_deref().map(|t| project.qualify(t));
                let response = handler.response_type.as_deref().map(|t| project.qualify(t));
                packages.extend(
                    request
                        .iter()
                        .chain(response.iter())
                        .filter_map(|t| qualifier(t)),
                );

                if let (Some(request), Some(response)) = (&request, &response) {
                    client_packages
                        .extend([request, response].into_iter().filter_map(|t| qualifier(t)));
                    client_methods.push(client_method(node, handler, request, response));
                }
                methods.push(MethodInfo {
                    name: handler.name.clone(),
                    comment: method_comment(node, handler),
                    request_type: request,
                    response_type: response,
                    serializer: handler
                        .serializer
                        .clone()
                        .unwrap_or_else(|| "JSON".to_string()),
                    method: handler.method.as_str().to_string(),
                    path: node.path.clone(),
                });
            }
        }

        let imports = model_imports(&project, packages);
        let client_imports = model_imports(&project, client_packages);

        tracing::debug!(
            middlewares = middlewares.len(),
            methods = methods.len(),
            client_methods = client_methods.len(),
            "built render context"
        );

        Ok(Self {
            project,
            router,
            routes,
            middlewares: middlewares.into_iter().collect(),
            methods,
            client_methods,
            imports,
            client_imports,
            config,
            insert_point: INSERT_POINT,
        })
    }
}

fn qualifier(type_name: &str) -> Option<String> {
    type_name
        .rsplit_once('.')
        .map(|(package, _)| package.to_string())
}

fn model_imports(project: &ProjectInfo, packages: IndexSet<String>) -> Vec<ImportSpec> {
    packages
        .into_iter()
        .map(|package| ImportSpec {
            path: format!("{}/biz/model/{}", project.module, package),
            alias: package,
        })
        .collect()
}

fn method_comment(node: &RouteNode, handler: &RouteHandler) -> String {
    let mut lines: Vec<String> = match handler.comment.as_deref().map(str::trim) {
        Some(comment) if !comment.is_empty() => comment
            .lines()
            .map(|line| format!("// {}", line.trim()).trim_end().to_string())
            .collect(),
        _ => vec![format!("// {} .", handler.name)],
    };
    lines.push(format!("// @router {} [{}]", node.path, handler.method));
    lines.join("\n")
}

fn client_method(
    node: &RouteNode,
    handler: &RouteHandler,
    request: &str,
    response: &str,
) -> ClientMethodInfo {
    let params = |location: ParamLocation| -> Vec<ClientParam> {
        handler
            .params
            .iter()
            .filter(|p| p.location == location)
            .map(|p| ClientParam {
                name: p.name.clone(),
                field: p.field.clone(),
            })
            .collect()
    };

    ClientMethodInfo {
        name: handler.name.clone(),
        request_type: request.to_string(),
        response_type: response.to_string(),
        method: handler.method.client_method().to_string(),
        path: node.path.clone(),
        query: params(ParamLocation::Query),
        path_params: params(ParamLocation::Path),
        headers: params(ParamLocation::Header),
        form: params(ParamLocation::Form),
        files: params(ParamLocation::File),
        body: handler
            .params
            .iter()
            .find(|p| p.location == ParamLocation::Body)
            .map(|p| p.field.clone()),
    }
}
