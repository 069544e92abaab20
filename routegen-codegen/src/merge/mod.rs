//! Incremental merging of fresh renders into previously generated files.
//!
//! - [`merge`] - Combine existing and fresh content under a [`MergeStrategy`]
//! - [`InsertionMarker`] - Locate the single splice point of aggregator files
//! - [`SymbolScanner`] - Split Go files into top-level function declarations
//!
//! Every strategy returns `fresh` verbatim when there is no existing file and
//! returns `existing` byte-identical when there is nothing to add, so merging
//! a file with its own fresh render is always a no-op.

mod imports;
mod marker;
mod symbols;

use std::path::Path;

pub use imports::ImportBlock;
pub use marker::{INSERT_POINT, INSERT_POINT_PATTERN, InsertionMarker, MarkerError, count_markers};
use routegen_core::MergeStrategy;
pub use symbols::{ScanError, Symbol, SymbolScanner};

use crate::{GenerateError, Result};

/// Merge freshly rendered content into the existing content of `path`.
///
/// `path` is only used for error reporting.
pub fn merge(
    existing: Option<&str>,
    fresh: &str,
    strategy: MergeStrategy,
    path: &Path,
) -> Result<String> {
    let Some(existing) = existing else {
        return Ok(fresh.to_string());
    };

    match strategy {
        MergeStrategy::Overwrite => Ok(fresh.to_string()),
        MergeStrategy::IfMissing => Ok(existing.to_string()),
        MergeStrategy::MarkerAppend => append_hooks(existing, fresh, path),
        MergeStrategy::PreserveSymbols => append_symbols(existing, fresh, path),
    }
}

fn append_hooks(existing: &str, fresh: &str, path: &Path) -> Result<String> {
    let current = InsertionMarker::locate(existing).map_err(|err| match err {
        MarkerError::Missing => GenerateError::MarkerNotFound {
            path: path.to_path_buf(),
        },
        MarkerError::Ambiguous(count) => GenerateError::conflict(
            path,
            format!("found {count} insertion markers, expected exactly one"),
        ),
    })?;
    let incoming = InsertionMarker::locate(fresh).map_err(|err| {
        GenerateError::conflict(
            path,
            match err {
                MarkerError::Missing => "fresh render has no insertion marker".to_string(),
                MarkerError::Ambiguous(count) => {
                    format!("fresh render has {count} insertion markers")
                }
            },
        )
    })?;

    let present: Vec<&str> = current.hooks().into_iter().map(str::trim).collect();
    let mut new_hooks: Vec<&str> = Vec::new();
    for hook in incoming.hooks() {
        let known = present.iter().any(|p| *p == hook.trim())
            || new_hooks.iter().any(|h| h.trim() == hook.trim());
        if !known {
            new_hooks.push(hook);
        }
    }

    if new_hooks.is_empty() {
        return Ok(existing.to_string());
    }

    tracing::debug!(
        path = %path.display(),
        hooks = new_hooks.len(),
        "inserting hooks above marker"
    );
    let merged = current.insert_above(&new_hooks);
    merge_imports(&merged, fresh, path)
}

fn merge_imports(merged: &str, fresh: &str, path: &Path) -> Result<String> {
    let conflict = |reason: String| GenerateError::conflict(path, reason);

    let Some(incoming) = ImportBlock::find(fresh).map_err(conflict)? else {
        return Ok(merged.to_string());
    };
    let Some(current) = ImportBlock::find(merged).map_err(conflict)? else {
        return Err(GenerateError::conflict(
            path,
            "existing file has no import block for new hooks",
        ));
    };

    let missing = current.missing_from(&incoming);
    if missing.is_empty() {
        return Ok(merged.to_string());
    }
    Ok(current.append(&missing))
}

fn append_symbols(existing: &str, fresh: &str, path: &Path) -> Result<String> {
    let current = SymbolScanner::scan(existing)
        .map_err(|err| GenerateError::conflict(path, format!("existing file: {err}")))?;
    let incoming = SymbolScanner::scan(fresh)
        .map_err(|err| GenerateError::conflict(path, format!("fresh render: {err}")))?;

    let missing: Vec<&Symbol<'_>> = incoming
        .values()
        .filter(|symbol| !current.contains_key(&symbol.name))
        .collect();

    if missing.is_empty() {
        return Ok(existing.to_string());
    }

    tracing::debug!(
        path = %path.display(),
        functions = ?missing.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        "appending new functions"
    );

    let mut output = existing.to_string();
    for symbol in missing {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push('\n');
        output.push_str(symbol.text);
        if !output.ends_with('\n') {
            output.push('\n');
        }
    }

    // New functions may reference packages the existing file does not import.
    let has_imports = ImportBlock::find(&output)
        .map_err(|reason| GenerateError::conflict(path, reason))?
        .is_some();
    if has_imports {
        return merge_imports(&output, fresh, path);
    }
    Ok(output)
}
