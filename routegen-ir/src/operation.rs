//! Operation descriptors.
//!
//! One [`OperationDescriptor`] stands for one annotated API endpoint. The
//! order of descriptors is significant: the route tree keeps first-seen order
//! so regenerated output stays stable and diff-friendly.

use serde::{Deserialize, Serialize};

use crate::HttpMethod;

/// One annotated API operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// HTTP verb. Required whenever `handler` is non-empty.
    #[serde(default)]
    pub method: Option<HttpMethod>,
    /// Slash-delimited route path, may contain `:name` and `*name` parameters.
    pub path: String,
    /// Generated handler function name. Empty for group-only descriptors.
    #[serde(default)]
    pub handler: String,
    /// Explicit handler-scope middleware tag.
    #[serde(default)]
    pub handler_middleware: Option<String>,
    /// Explicit group-scope middleware tag for the node at `path`.
    #[serde(default)]
    pub group_middleware: Option<String>,
    /// Request type name.
    #[serde(default, alias = "request")]
    pub request_type: Option<String>,
    /// Response type name.
    #[serde(default, alias = "response")]
    pub response_type: Option<String>,
    /// Doc comment emitted above the generated handler.
    #[serde(default)]
    pub comment: Option<String>,
    /// Response serializer method (e.g. `JSON`, `ProtoBuf`).
    #[serde(default)]
    pub serializer: Option<String>,
    /// Parameter bindings used by client templates.
    #[serde(default)]
    pub params: Vec<ParamBinding>,
}

impl OperationDescriptor {
    /// Create a descriptor bound to a handler.
    pub fn new(method: HttpMethod, path: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            method: Some(method),
            path: path.into(),
            handler: handler.into(),
            handler_middleware: None,
            group_middleware: None,
            request_type: None,
            response_type: None,
            comment: None,
            serializer: None,
            params: Vec::new(),
        }
    }

    /// Create a group-only descriptor (no handler) for `path`.
    pub fn group(path: impl Into<String>) -> Self {
        Self {
            method: None,
            path: path.into(),
            handler: String::new(),
            handler_middleware: None,
            group_middleware: None,
            request_type: None,
            response_type: None,
            comment: None,
            serializer: None,
            params: Vec::new(),
        }
    }

    /// Set the request and response type names.
    pub fn types(mut self, request: impl Into<String>, response: impl Into<String>) -> Self {
        self.request_type = Some(request.into());
        self.response_type = Some(response.into());
        self
    }

    /// Set the handler-scope middleware tag.
    pub fn handler_middleware(mut self, tag: impl Into<String>) -> Self {
        self.handler_middleware = Some(tag.into());
        self
    }

    /// Set the group-scope middleware tag.
    pub fn group_middleware(mut self, tag: impl Into<String>) -> Self {
        self.group_middleware = Some(tag.into());
        self
    }

    /// Set the doc comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Add a parameter binding.
    pub fn param(mut self, param: ParamBinding) -> Self {
        self.params.push(param);
        self
    }

    /// Returns true if this descriptor binds a handler.
    pub fn has_handler(&self) -> bool {
        !self.handler.is_empty()
    }

    /// Validate the descriptor invariants.
    ///
    /// Returns a human readable reason when the descriptor is malformed.
    pub fn invalid_reason(&self) -> Option<String> {
        if self.path.is_empty() {
            return Some("path must not be empty".to_string());
        }
        if !self.path.starts_with('/') {
            return Some(format!("path '{}' must start with '/'", self.path));
        }
        if self.has_handler() && self.method.is_none() {
            return Some(format!(
                "handler '{}' on '{}' has no HTTP method",
                self.handler, self.path
            ));
        }
        None
    }
}

/// Where a request parameter travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamLocation {
    Query,
    Path,
    Header,
    Form,
    File,
    Body,
}

/// Binding between a wire parameter and a field of the request type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamBinding {
    /// Wire name (query key, header name, path parameter, form field).
    pub name: String,
    /// Expression reading the value from the request object (e.g. `req.ID`).
    pub field: String,
    /// Parameter location.
    pub location: ParamLocation,
}

impl ParamBinding {
    pub fn new(name: impl Into<String>, field: impl Into<String>, location: ParamLocation) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            location,
        }
    }
}
