use std::path::{Path, PathBuf};

use routegen_core::MergeStrategy;
use serde::Deserialize;

use crate::{Error, Result};

/// A `[templates.<name>]` entry.
///
/// Entries whose name matches a default template replace the given fields of
/// that template; any other name declares a custom template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateOverride {
    /// Output path pattern. Custom templates without a path are partials.
    #[serde(default)]
    pub path: Option<String>,
    /// Variable delimiter pair, e.g. `["[[", "]]"]`.
    #[serde(default)]
    pub delims: Option<[String; 2]>,
    /// Inline template body.
    #[serde(default)]
    pub body: Option<String>,
    /// Template body loaded from a file, relative to routegen.toml.
    #[serde(default)]
    pub body_file: Option<PathBuf>,
    /// Merge strategy for the output file.
    #[serde(default)]
    pub strategy: Option<MergeStrategy>,
}

impl TemplateOverride {
    /// Load `body_file` into `body` when no inline body is given.
    pub fn resolve_body(&mut self, base_dir: &Path) -> Result<()> {
        if self.body.is_some() {
            return Ok(());
        }
        if let Some(file) = &self.body_file {
            let path = base_dir.join(file);
            let body = std::fs::read_to_string(&path)
                .map_err(|source| Box::new(Error::Io { path, source }))?;
            self.body = Some(body);
        }
        Ok(())
    }
}
