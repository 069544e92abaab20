//! Manifest types and parsing for routegen.toml files.

mod file;
mod parse;
mod project;
mod template;
mod validate;

use indexmap::IndexMap;
use routegen_ir::OperationDescriptor;
use serde::Deserialize;

pub use file::RouteGenToml;
pub use parse::parse_manifest;
pub use project::ProjectConfig;
pub use template::TemplateOverride;
pub use validate::ParseContext;

/// Root manifest for routegen.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Project settings shared by every template.
    pub project: ProjectConfig,

    /// Operation descriptors, in IDL declaration order.
    #[serde(default)]
    pub operations: Vec<OperationDescriptor>,

    /// Template overrides and custom templates, keyed by template name.
    #[serde(default)]
    pub templates: IndexMap<String, TemplateOverride>,
}

impl Manifest {
    /// Operations that bind a handler (group-only descriptors excluded).
    pub fn handler_operations(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.iter().filter(|op| op.has_handler())
    }

    /// Check whether an operation with the given handler name exists.
    pub fn has_handler(&self, name: &str) -> bool {
        self.operations.iter().any(|op| op.handler == name)
    }
}
