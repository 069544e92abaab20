//! Tree operation - route tree display.

use eyre::{Context, Result};
use routegen_codegen::{
    generation::Generator,
    route::{DisplayStyle, RouteTreeDisplay},
};
use routegen_manifest::Manifest;

use crate::reports::TreeReport;

/// Output format of the tree operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Tree,
    Flat,
    Json,
}

/// Build the route tree and render it in `format`.
pub fn tree(manifest: &Manifest, format: TreeFormat) -> Result<TreeReport> {
    let generator = Generator::from_manifest(manifest).wrap_err("Failed to load templates")?;
    let root = generator.tree().wrap_err("Failed to build route tree")?;

    let rendered = match format {
        TreeFormat::Tree => RouteTreeDisplay::new(&root).to_string(),
        TreeFormat::Flat => RouteTreeDisplay::new(&root)
            .style(DisplayStyle::Flat)
            .to_string(),
        TreeFormat::Json => {
            serde_json::to_string_pretty(&root).wrap_err("Failed to serialize route tree")?
        }
    };

    Ok(TreeReport {
        service: manifest.project.service.clone(),
        handler_count: root.handler_count(),
        json: format == TreeFormat::Json,
        rendered,
    })
}
