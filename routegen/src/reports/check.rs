//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Number of operation descriptors.
    pub operations: usize,
    /// Error messages.
    pub errors: Vec<String>,
    /// Files an update would create or change.
    pub pending: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!(
            "✓ {} is valid ({} operations)",
            self.config_path.display(),
            self.operations
        ));

        if !self.pending.is_empty() {
            out.newline();
            out.section("Pending changes");
            for path in &self.pending {
                out.list_item(path);
            }
        }
    }
}
