//! Go import block handling for aggregator files.
//!
//! A new hook usually calls into a package the existing file does not import
//! yet, so marker merges carry the fresh file's import specs along.

/// The parenthesized `import ( ... )` block of a Go file.
#[derive(Debug)]
pub struct ImportBlock<'a> {
    lines: Vec<&'a str>,
    /// Line index of `import (`.
    open: usize,
    /// Line index of the closing `)`.
    close: usize,
}

impl<'a> ImportBlock<'a> {
    /// Find the first import block in `text`.
    ///
    /// Returns `Ok(None)` when the file has no block and `Err` when the block
    /// is never closed.
    pub fn find(text: &'a str) -> Result<Option<Self>, String> {
        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        let Some(open) = lines.iter().position(|line| line.trim_end() == "import (") else {
            return Ok(None);
        };
        let close = lines[open + 1..]
            .iter()
            .position(|line| line.trim() == ")")
            .map(|offset| open + 1 + offset)
            .ok_or_else(|| "import block is not closed".to_string())?;

        Ok(Some(Self { lines, open, close }))
    }

    /// Import spec lines, without line endings and blank lines.
    pub fn specs(&self) -> Vec<&'a str> {
        self.lines[self.open + 1..self.close]
            .iter()
            .map(|line| line.trim_end_matches(['\n', '\r']))
            .filter(|line| !line.trim().is_empty())
            .collect()
    }

    /// Specs from `other` that this block does not contain yet, compared
    /// ignoring surrounding whitespace.
    pub fn missing_from<'b>(&self, other: &ImportBlock<'b>) -> Vec<&'b str> {
        let present: Vec<&str> = self.specs().into_iter().map(str::trim).collect();
        let mut missing: Vec<&str> = Vec::new();
        for spec in other.specs() {
            let known = present.iter().any(|p| *p == spec.trim())
                || missing.iter().any(|m| m.trim() == spec.trim());
            if !known {
                missing.push(spec);
            }
        }
        missing
    }

    /// Append `specs` at the end of the block.
    pub fn append(&self, specs: &[&str]) -> String {
        let mut output = String::new();
        for line in &self.lines[..self.close] {
            output.push_str(line);
        }
        for spec in specs {
            output.push_str(spec);
            output.push('\n');
        }
        for line in &self.lines[self.close..] {
            output.push_str(line);
        }
        output
    }
}
