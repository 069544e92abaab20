//! Tree command report data structures.

use super::output::{Output, Report};

/// Report data from route tree display.
#[derive(Debug)]
pub struct TreeReport {
    /// Service name from manifest.
    pub service: String,
    /// Number of bound handlers.
    pub handler_count: usize,
    /// Whether `rendered` is JSON and must be printed alone.
    pub json: bool,
    /// Rendered tree.
    pub rendered: String,
}

impl Report for TreeReport {
    fn render(&self, out: &mut dyn Output) {
        if self.json {
            out.preformatted(&self.rendered);
            return;
        }

        out.section(&format!("{} routes ({})", self.service, self.handler_count));
        out.preformatted(&self.rendered);
    }
}
