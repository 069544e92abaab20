use routegen_ir::{HttpMethod, ParamBinding};
use serde::Serialize;

/// A handler bound at one route node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteHandler {
    pub method: HttpMethod,
    /// Registration method on the router group (`GET`, `Any`).
    pub router_method: &'static str,
    /// Handler function name.
    pub name: String,
    /// Handler-scope middleware tag. Derived tags are unique across the
    /// tree; an explicit tag may be shared by several handlers.
    pub middleware: String,
    pub request_type: Option<String>,
    pub response_type: Option<String>,
    pub comment: Option<String>,
    pub serializer: Option<String>,
    pub params: Vec<ParamBinding>,
}

/// A node of the route tree.
///
/// The root represents `/` and is referenced directly by the router object,
/// so it never carries a group name or group middleware. Leaves register on
/// their parent's group and carry none either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteNode {
    /// Full path from the root (`/users/:id`).
    pub path: String,
    /// Path relative to the parent node (`/:id`).
    pub segment: String,
    /// Group variable name, unique across the tree. Set for inner nodes only.
    pub group_name: Option<String>,
    /// Group-scope middleware tag.
    pub group_middleware: Option<String>,
    pub handlers: Vec<RouteHandler>,
    /// Children in first-seen descriptor order.
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub(crate) fn root() -> Self {
        Self::new("/", "/")
    }

    pub(crate) fn new(path: impl Into<String>, segment: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            segment: segment.into(),
            group_name: None,
            group_middleware: None,
            handlers: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.path == "/"
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Find the handler registered for `method`, if any.
    pub fn handler(&self, method: HttpMethod) -> Option<&RouteHandler> {
        self.handlers.iter().find(|h| h.method == method)
    }

    /// Look up a direct child by its segment.
    pub fn child(&self, segment: &str) -> Option<&RouteNode> {
        self.children.iter().find(|c| c.segment == segment)
    }

    /// Find a node anywhere in the tree by full path.
    pub fn find(&self, path: &str) -> Option<&RouteNode> {
        self.walk().find(|node| node.path == path)
    }

    /// Pre-order traversal, starting with this node.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of nodes without children.
    pub fn leaf_count(&self) -> usize {
        self.walk().filter(|node| !node.has_children()).count()
    }

    /// Number of handlers bound anywhere in the tree.
    pub fn handler_count(&self) -> usize {
        self.walk().map(|node| node.handlers.len()).sum()
    }
}

/// Pre-order iterator over a route tree.
pub struct Walk<'a> {
    stack: Vec<&'a RouteNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a RouteNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
