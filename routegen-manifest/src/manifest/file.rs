use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// A routegen.toml file with both raw content and the parsed manifest.
///
/// Opening the file also loads every template `body_file`, resolved
/// relative to the directory containing routegen.toml.
pub struct RouteGenToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl RouteGenToml {
    /// Open and parse a routegen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let mut manifest = Manifest::from_str_with_filename(&content, &filename)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        for template in manifest.templates.values_mut() {
            template.resolve_body(base_dir)?;
        }

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Consume the file and return the parsed manifest.
    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }
}
