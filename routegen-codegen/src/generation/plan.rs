use std::{
    fmt,
    path::{Path, PathBuf},
};

use routegen_core::{MergeStrategy, write_atomic};

use crate::{GenerateError, Result};

/// What committing a staged file does to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedAction {
    /// The file does not exist yet.
    Create,
    /// The file exists and its merged content differs.
    Update,
    /// The merged content equals the file on disk.
    Unchanged,
}

impl fmt::Display for StagedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StagedAction::Create => "create",
            StagedAction::Update => "update",
            StagedAction::Unchanged => "unchanged",
        })
    }
}

/// A fully merged output file waiting to be written.
#[derive(Debug, Clone)]
pub struct StagedFile {
    /// Absolute or output-dir-joined destination.
    pub path: PathBuf,
    /// Path relative to the output directory, as rendered.
    pub relative: String,
    /// Template that produced the file.
    pub template: String,
    pub strategy: MergeStrategy,
    /// Final content after merging with the existing file.
    pub content: String,
    pub action: StagedAction,
}

/// A preview entry for displaying what would be generated.
#[derive(Debug, Clone)]
pub struct PreviewFile {
    /// Relative path from output directory.
    pub path: String,
    pub template: String,
    pub action: StagedAction,
    /// File content.
    pub content: String,
}

/// Every output of one generation run, merged but not yet written.
///
/// Building a plan only reads the file system; nothing is written until
/// [`GenerationPlan::commit`].
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    root: PathBuf,
    files: Vec<StagedFile>,
}

impl GenerationPlan {
    pub(crate) fn new(root: PathBuf, files: Vec<StagedFile>) -> Self {
        Self { root, files }
    }

    /// Output directory the plan was built for.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Staged files in template registration order.
    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    /// Find the staged file produced by `template`.
    pub fn file_for(&self, template: &str) -> Option<&StagedFile> {
        self.files.iter().find(|file| file.template == template)
    }

    /// Returns true if committing would write at least one file.
    pub fn has_changes(&self) -> bool {
        self.files
            .iter()
            .any(|file| file.action != StagedAction::Unchanged)
    }

    /// Preview all staged files.
    pub fn preview(&self) -> Vec<PreviewFile> {
        self.files
            .iter()
            .map(|file| PreviewFile {
                path: file.relative.clone(),
                template: file.template.clone(),
                action: file.action,
                content: file.content.clone(),
            })
            .collect()
    }

    /// Write every created or updated file.
    ///
    /// Each file is written to a temporary file next to its destination and
    /// renamed into place. Unchanged files are not touched.
    pub fn commit(&self) -> Result<WriteStats> {
        let mut stats = WriteStats::default();

        for file in &self.files {
            match file.action {
                StagedAction::Unchanged => {
                    stats.unchanged.push(file.relative.clone());
                    continue;
                }
                StagedAction::Create => stats.created.push(file.relative.clone()),
                StagedAction::Update => stats.updated.push(file.relative.clone()),
            }

            tracing::debug!(path = %file.path.display(), action = %file.action, "writing file");
            write_atomic(&file.path, &file.content).map_err(|source| GenerateError::Io {
                path: file.path.clone(),
                source,
            })?;
        }

        tracing::info!(
            created = stats.created.len(),
            updated = stats.updated.len(),
            unchanged = stats.unchanged.len(),
            "committed generation plan"
        );
        Ok(stats)
    }
}

/// Statistics from a commit.
#[derive(Debug, Default)]
pub struct WriteStats {
    /// Paths of newly created files.
    pub created: Vec<String>,
    /// Paths of files whose content changed.
    pub updated: Vec<String>,
    /// Paths of files left as they were.
    pub unchanged: Vec<String>,
}

impl WriteStats {
    /// Number of files written.
    pub fn written(&self) -> usize {
        self.created.len() + self.updated.len()
    }

    /// Total number of files processed.
    pub fn total(&self) -> usize {
        self.written() + self.unchanged.len()
    }
}
