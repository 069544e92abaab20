//! Generate command report data structures.

use std::path::PathBuf;

use routegen_codegen::generation::{PreviewFile, StagedAction, WriteStats};

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Service name from manifest.
    pub service: String,

    /// Go module path from manifest.
    pub module: String,

    /// Number of bound handlers.
    pub handler_count: usize,

    /// Route tree display string.
    pub route_tree: String,

    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    pub stats: WriteStats,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Every staged file, including unchanged ones.
    pub files: Vec<PreviewFile>,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.preformatted(&format!("{} ({})", self.service, self.module));
        out.newline();

        out.section(&format!("Routes ({})", self.handler_count));
        out.preformatted(&self.route_tree);
        out.newline();

        out.key_value("Output", &written.output_dir.display().to_string());

        let stats = &written.stats;
        if !stats.created.is_empty() {
            out.newline();
            out.section("Created");
            for path in &stats.created {
                out.added_item(path);
            }
        }

        if !stats.updated.is_empty() {
            out.newline();
            out.section("Updated");
            for path in &stats.updated {
                out.changed_item(path);
            }
        }

        if stats.written() == 0 {
            out.newline();
            out.preformatted(&format!("All {} files are up to date", stats.total()));
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        let mut unchanged = 0;
        for file in &preview.files {
            if file.action == StagedAction::Unchanged {
                unchanged += 1;
                continue;
            }
            out.divider(&format!("{} ({})", file.path, file.action));
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} files would be written, {} unchanged",
            preview.files.len() - unchanged,
            unchanged
        ));
    }
}
