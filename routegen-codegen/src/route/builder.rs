use indexmap::IndexMap;
use routegen_ir::OperationDescriptor;

use super::{RouteHandler, RouteNode};
use crate::{
    GenerateError, Result,
    naming::{NameAllocator, group_name_for_segment, handler_middleware_tag},
};

/// Builds a prefix-grouped route tree from an ordered list of descriptors.
///
/// Building is pure: the same descriptor order always yields the same tree,
/// including every generated group and middleware name. Explicit middleware
/// tags are kept exactly as written; only derived names are disambiguated.
///
/// # Example
///
/// ```
/// use routegen_codegen::route::RouteTreeBuilder;
/// use routegen_ir::{HttpMethod, OperationDescriptor};
///
/// let root = RouteTreeBuilder::build(&[
///     OperationDescriptor::new(HttpMethod::Get, "/users", "ListUsers"),
///     OperationDescriptor::new(HttpMethod::Get, "/users/:id", "GetUser"),
/// ])
/// .unwrap();
///
/// let users = root.child("/users").unwrap();
/// assert_eq!(users.group_name.as_deref(), Some("_users"));
/// assert_eq!(users.child("/:id").unwrap().path, "/users/:id");
/// ```
#[derive(Debug)]
pub struct RouteTreeBuilder {
    root: RouteNode,
    /// Descriptor index that first set each node's group middleware.
    group_origins: IndexMap<String, usize>,
}

impl Default for RouteTreeBuilder {
    fn default() -> Self {
        Self {
            root: RouteNode::root(),
            group_origins: IndexMap::new(),
        }
    }
}

impl RouteTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tree for `descriptors` in one call.
    pub fn build(descriptors: &[OperationDescriptor]) -> Result<RouteNode> {
        let mut builder = Self::new();
        for (index, op) in descriptors.iter().enumerate() {
            builder.insert(index, op)?;
        }
        builder.finish()
    }

    /// Insert one descriptor. `index` is its position in the input list and
    /// is only used for error reporting.
    pub fn insert(&mut self, index: usize, op: &OperationDescriptor) -> Result<()> {
        if let Some(reason) = op.invalid_reason() {
            return Err(GenerateError::InvalidDescriptor { index, reason });
        }

        let node = node_for_path(&mut self.root, &op.path);

        if let Some(tag) = &op.group_middleware {
            match &node.group_middleware {
                Some(existing) if existing != tag => {
                    return Err(GenerateError::InvalidDescriptor {
                        index,
                        reason: format!(
                            "group middleware '{}' on '{}' conflicts with '{}'",
                            tag, node.path, existing
                        ),
                    });
                }
                Some(_) => {}
                None => {
                    node.group_middleware = Some(tag.clone());
                    self.group_origins.insert(node.path.clone(), index);
                }
            }
        }

        if !op.has_handler() {
            return Ok(());
        }

        let method = op.method.ok_or_else(|| GenerateError::InvalidDescriptor {
            index,
            reason: format!("handler '{}' has no HTTP method", op.handler),
        })?;

        if node
            .handlers
            .iter()
            .any(|existing| existing.method.conflicts_with(&method))
        {
            return Err(GenerateError::DuplicateRoute {
                method,
                path: node.path.clone(),
            });
        }

        tracing::trace!(%method, path = %node.path, handler = %op.handler, "bind handler");
        node.handlers.push(RouteHandler {
            method,
            router_method: method.router_method(),
            name: op.handler.clone(),
            // Left empty until `finish` derives a default.
            middleware: op
                .handler_middleware
                .clone()
                .filter(|tag| !tag.is_empty())
                .unwrap_or_default(),
            request_type: op.request_type.clone(),
            response_type: op.response_type.clone(),
            comment: op.comment.clone(),
            serializer: op.serializer.clone(),
            params: op.params.clone(),
        });
        Ok(())
    }

    /// Prune dead group-only leaves and assign tree-wide unique names.
    ///
    /// Fails when an explicit group middleware tag lands on a node that
    /// declares no group: the root, or a node left without children.
    pub fn finish(mut self) -> Result<RouteNode> {
        prune(&mut self.root);
        self.check_group_middleware()?;

        // Explicit tags are fixed, so derived names must route around them.
        let mut names = NameAllocator::new();
        for node in self.root.walk() {
            if let Some(tag) = &node.group_middleware {
                names.reserve(tag);
            }
            for handler in node.handlers.iter().filter(|h| !h.middleware.is_empty()) {
                names.reserve(&handler.middleware);
            }
        }
        assign_names(&mut self.root, &mut names);

        tracing::debug!(
            nodes = self.root.walk().count(),
            handlers = self.root.handler_count(),
            "built route tree"
        );
        Ok(self.root)
    }

    fn check_group_middleware(&self) -> Result<()> {
        for (path, &index) in &self.group_origins {
            let Some(node) = self.root.find(path) else {
                tracing::warn!(%path, "dropping group middleware on a group without routes");
                continue;
            };
            if node.is_root() || !node.has_children() {
                let tag = node.group_middleware.as_deref().unwrap_or_default();
                return Err(GenerateError::InvalidDescriptor {
                    index,
                    reason: format!(
                        "group middleware '{tag}' on '{path}' needs routes nested below it"
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Split a path into its non-empty segments, collapsing repeated and
/// trailing slashes.
fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|seg| !seg.is_empty())
}

fn node_for_path<'a>(root: &'a mut RouteNode, path: &str) -> &'a mut RouteNode {
    let mut node = root;
    for seg in path_segments(path) {
        let segment = format!("/{seg}");
        let index = match node.children.iter().position(|c| c.segment == segment) {
            Some(index) => index,
            None => {
                let full_path = if node.is_root() {
                    segment.clone()
                } else {
                    format!("{}{}", node.path, segment)
                };
                tracing::trace!(path = %full_path, "create route node");
                node.children.push(RouteNode::new(full_path, segment));
                node.children.len() - 1
            }
        };
        node = &mut node.children[index];
    }
    node
}

fn prune(node: &mut RouteNode) {
    for child in &mut node.children {
        prune(child);
    }
    node.children.retain(|child| {
        let live = !child.handlers.is_empty() || child.has_children();
        if !live {
            tracing::debug!(path = %child.path, "pruning group without routes");
        }
        live
    });
}

fn assign_names(node: &mut RouteNode, names: &mut NameAllocator) {
    // The root and leaves never declare a group of their own.
    if !node.is_root() && node.has_children() {
        let group_name = names.claim(&group_name_for_segment(&node.segment));
        if node.group_middleware.is_none() {
            node.group_middleware = Some(group_name.clone());
        }
        node.group_name = Some(group_name);
    }

    for handler in node.handlers.iter_mut().filter(|h| h.middleware.is_empty()) {
        handler.middleware = names.claim(&handler_middleware_tag(&handler.name));
    }
    for child in &mut node.children {
        assign_names(child, names);
    }
}
