use std::sync::LazyLock;

use regex::Regex;

/// Insertion marker literal embedded in aggregator templates.
///
/// Previously generated files are located by this exact text, so it must
/// never change.
pub const INSERT_POINT: &str = "//INSERT_POINT: DO NOT DELETE THIS LINE!";

/// Multi-line regular expression matching a marker line.
pub const INSERT_POINT_PATTERN: &str = r"(?m)^[ \t]*//INSERT_POINT: DO NOT DELETE THIS LINE![ \t]*$";

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INSERT_POINT_PATTERN).expect("marker pattern is valid"));

/// A file split into lines around its single insertion marker.
#[derive(Debug)]
pub struct InsertionMarker<'a> {
    lines: Vec<&'a str>,
    index: usize,
}

/// Why a marker could not be located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    Missing,
    Ambiguous(usize),
}

impl<'a> InsertionMarker<'a> {
    /// Locate the single marker line in `text`.
    pub fn locate(text: &'a str) -> Result<Self, MarkerError> {
        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        let found: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_marker_line(line))
            .map(|(i, _)| i)
            .collect();

        match found.as_slice() {
            [] => Err(MarkerError::Missing),
            [index] => Ok(Self {
                lines,
                index: *index,
            }),
            many => Err(MarkerError::Ambiguous(many.len())),
        }
    }

    /// Hook lines directly above the marker, top to bottom.
    ///
    /// The block is the run of non-blank lines ending at the marker; it
    /// stops at a block opener (a line ending in `{`).
    pub fn hooks(&self) -> Vec<&'a str> {
        let mut hooks: Vec<&str> = self.lines[..self.index]
            .iter()
            .rev()
            .map(|line| line.trim_end_matches(['\n', '\r']))
            .take_while(|line| !line.trim().is_empty() && !line.trim_end().ends_with('{'))
            .collect();
        hooks.reverse();
        hooks
    }

    /// Insert `hooks` directly above the marker line.
    pub fn insert_above(&self, hooks: &[&str]) -> String {
        let mut output = String::new();
        for line in &self.lines[..self.index] {
            output.push_str(line);
        }
        for hook in hooks {
            output.push_str(hook);
            output.push('\n');
        }
        for line in &self.lines[self.index..] {
            output.push_str(line);
        }
        output
    }
}

fn is_marker_line(line: &str) -> bool {
    MARKER.is_match(line.trim_end_matches(['\n', '\r']))
}

/// Count marker lines in `text`.
pub fn count_markers(text: &str) -> usize {
    text.split_inclusive('\n')
        .filter(|line| is_marker_line(line))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTER: &str = "func GeneratedRegister(r *server.Hertz) {\n\tdemo.Register(r)\n\tother.Register(r)\n\t//INSERT_POINT: DO NOT DELETE THIS LINE!\n}\n";

    #[test]
    fn test_locate_marker() {
        assert!(InsertionMarker::locate(REGISTER).is_ok());
        assert_eq!(count_markers(REGISTER), 1);
    }

    #[test]
    fn test_marker_with_trailing_whitespace() {
        let text = "  //INSERT_POINT: DO NOT DELETE THIS LINE!  \r\n";
        assert!(InsertionMarker::locate(text).is_ok());
    }

    #[test]
    fn test_missing_and_ambiguous_marker() {
        assert_eq!(
            InsertionMarker::locate("package router\n").unwrap_err(),
            MarkerError::Missing
        );

        let twice = format!("{INSERT_POINT}\n{INSERT_POINT}\n");
        assert_eq!(
            InsertionMarker::locate(&twice).unwrap_err(),
            MarkerError::Ambiguous(2)
        );
        assert_eq!(count_markers(&twice), 2);
    }

    #[test]
    fn test_marker_text_inside_line_is_not_a_marker() {
        let text = format!("x := \"{INSERT_POINT}\"\n");
        assert_eq!(
            InsertionMarker::locate(&text).unwrap_err(),
            MarkerError::Missing
        );
    }

    #[test]
    fn test_hooks_stop_at_block_opener() {
        let marker = InsertionMarker::locate(REGISTER).unwrap();
        assert_eq!(marker.hooks(), ["\tdemo.Register(r)", "\tother.Register(r)"]);
    }

    #[test]
    fn test_hooks_stop_at_blank_line() {
        let text = "a()\n\nb()\n//INSERT_POINT: DO NOT DELETE THIS LINE!\n";
        let marker = InsertionMarker::locate(text).unwrap();
        assert_eq!(marker.hooks(), ["b()"]);
    }

    #[test]
    fn test_insert_above() {
        let marker = InsertionMarker::locate(REGISTER).unwrap();
        let merged = marker.insert_above(&["\tthird.Register(r)"]);
        assert_eq!(
            merged,
            "func GeneratedRegister(r *server.Hertz) {\n\tdemo.Register(r)\n\tother.Register(r)\n\tthird.Register(r)\n\t//INSERT_POINT: DO NOT DELETE THIS LINE!\n}\n"
        );
    }
}
