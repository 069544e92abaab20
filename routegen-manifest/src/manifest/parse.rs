//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{
    Manifest,
    validate::{ParseContext, find_key_value_span},
};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "routegen.toml")
    }
}

impl Manifest {
    /// Parse a routegen.toml file from the given path.
    ///
    /// Template `body_file` entries are not loaded; use
    /// [`RouteGenToml::open`](super::RouteGenToml::open) for that.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a routegen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    let project_ctx = ctx.push("project");
    project_ctx.validate_name(&manifest.project.service, "service")?;
    project_ctx.validate_name(&manifest.project.package, "package")?;
    project_ctx.validate_name(manifest.project.handler_package(), "handler_package")?;
    project_ctx.validate_name(manifest.project.router_package(), "router_package")?;
    project_ctx.validate_name(manifest.project.model_package(), "model_package")?;

    if manifest.project.module.trim().is_empty() {
        return Err(ctx
            .source()
            .validation_error("project.module must not be empty", None));
    }

    let mut handlers: Vec<&str> = Vec::new();
    for (index, op) in manifest.operations.iter().enumerate() {
        ctx.validate_operation(index, op)?;
        if !op.has_handler() {
            continue;
        }
        if handlers.contains(&op.handler.as_str()) {
            return Err(ctx.source().invalid_operation_error(
                index,
                format!("handler '{}' is already bound to another operation", op.handler),
                find_key_value_span(src, "handler", &op.handler),
            ));
        }
        handlers.push(&op.handler);
    }

    let templates_ctx = ctx.push("templates");
    for (name, template) in &manifest.templates {
        let template_ctx = templates_ctx.push(name);
        if let Some(delims) = &template.delims {
            template_ctx.validate_delims(delims)?;
        }
        if template.body.is_some() && template.body_file.is_some() {
            return Err(ctx.source().validation_error(
                format!("template '{name}' sets both 'body' and 'body_file'"),
                None,
            ));
        }
    }

    Ok(())
}
