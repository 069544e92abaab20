use std::{
    io::{self, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// How freshly rendered content combines with a file already on disk.
///
/// Every strategy writes the fresh render verbatim when the file does not
/// exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Fully generated file: the fresh render replaces the existing content.
    Overwrite,
    /// Scaffolding written once: existing content always wins.
    IfMissing,
    /// Aggregator file: new hook lines are spliced in above the insertion marker.
    MarkerAppend,
    /// Developer-owned file: existing functions are kept, missing ones appended.
    PreserveSymbols,
}

/// Read the current content of a managed file.
///
/// Returns `Ok(None)` when the file does not exist yet (first generation).
pub fn read_existing(path: &Path) -> io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write a file by staging it next to its destination and renaming it into place.
///
/// Readers never observe a half-written file: the content lands in a
/// temporary file in the same directory, which is then persisted over `path`.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(content.as_bytes())?;
    staged.flush()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}
