//! Check operation - manifest validation.

use std::path::Path;

use routegen_codegen::generation::{Generator, StagedAction};
use routegen_manifest::Manifest;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Builds the full generation plan against `output_dir` without writing,
/// so route conflicts, template errors and broken markers all surface here.
pub fn check(manifest: &Manifest, config_path: &Path, output_dir: &Path) -> CheckReport {
    let mut errors = Vec::new();
    let mut pending = Vec::new();

    match Generator::from_manifest(manifest).and_then(|generator| generator.plan(output_dir)) {
        Ok(plan) => {
            pending = plan
                .files()
                .iter()
                .filter(|file| file.action != StagedAction::Unchanged)
                .map(|file| format!("{} ({})", file.relative, file.action))
                .collect();
        }
        Err(err) => errors.push(err.to_string()),
    }

    CheckReport {
        config_path: config_path.to_path_buf(),
        operations: manifest.operations.len(),
        errors,
        pending,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_check_reports_duplicate_route() {
        let manifest: Manifest = r#"
[project]
module = "github.com/acme/demo"
service = "Demo"
package = "demo"

[[operations]]
method = "GET"
path = "/ping"
handler = "Ping"

[[operations]]
method = "ANY"
path = "/ping"
handler = "PingAny"
"#
        .parse()
        .unwrap();
        let temp = TempDir::new().unwrap();

        let report = check(&manifest, Path::new("routegen.toml"), temp.path());
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("duplicate route"));
        assert!(report.pending.is_empty());
    }
}
