use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

/// Top-level Go function or method signature. Group 1 is the receiver type,
/// group 2 the function name.
static SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^func\s+(?:\(\s*(?:[A-Za-z_]\w*\s+)?\*?\s*([A-Za-z_]\w*)[^)]*\)\s*)?([A-Za-z_]\w*)\s*[\[(]",
    )
    .expect("signature pattern is valid")
});

/// A top-level function declaration found by [`SymbolScanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol<'a> {
    /// `Name` for functions, `Receiver.Name` for methods.
    pub name: String,
    /// Zero-based line of the first leading comment, or of the signature.
    pub start: usize,
    /// Zero-based line of the closing brace.
    pub end: usize,
    /// Declaration text including leading comments and line endings.
    pub text: &'a str,
}

/// Reasons a file cannot be split into declarations unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("function '{name}' starting on line {line} is never closed")]
    Unterminated { name: String, line: usize },

    #[error("function '{name}' on line {line} starts inside '{outer}'")]
    Nested {
        name: String,
        outer: String,
        line: usize,
    },

    #[error("function '{name}' is declared twice (line {line})")]
    Duplicate { name: String, line: usize },
}

/// Regex-based scanner for top-level Go declarations.
///
/// A declaration starts at a `func` signature in column zero and ends at the
/// first following line that is exactly `}`. Contiguous `//` comment lines
/// directly above the signature belong to it.
pub struct SymbolScanner;

impl SymbolScanner {
    /// Split `text` into its function declarations, in file order.
    ///
    /// Line numbers in errors are one-based.
    pub fn scan(text: &str) -> Result<IndexMap<String, Symbol<'_>>, ScanError> {
        let lines: Vec<(usize, &str)> = line_offsets(text);
        let mut symbols: IndexMap<String, Symbol<'_>> = IndexMap::new();
        let mut comment_start: Option<usize> = None;
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].1.trim_end_matches(['\n', '\r']);

            let Some(name) = signature_name(line) else {
                if line.starts_with("//") {
                    comment_start.get_or_insert(i);
                } else {
                    comment_start = None;
                }
                i += 1;
                continue;
            };

            let start = comment_start.take().unwrap_or(i);
            let end = if is_single_line(line) {
                i
            } else {
                find_closing_brace(&lines, i, &name)?
            };

            if symbols.contains_key(&name) {
                return Err(ScanError::Duplicate { name, line: i + 1 });
            }

            let from = lines[start].0;
            let to = lines[end].0 + lines[end].1.len();
            symbols.insert(
                name.clone(),
                Symbol {
                    name,
                    start,
                    end,
                    text: &text[from..to],
                },
            );
            i = end + 1;
        }

        Ok(symbols)
    }
}

fn line_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .map(|line| {
            let start = offset;
            offset += line.len();
            (start, line)
        })
        .collect()
}

fn signature_name(line: &str) -> Option<String> {
    let caps = SIGNATURE.captures(line)?;
    let name = caps.get(2)?.as_str();
    Some(match caps.get(1) {
        Some(receiver) => format!("{}.{}", receiver.as_str(), name),
        None => name.to_string(),
    })
}

fn is_single_line(line: &str) -> bool {
    let opens = line.matches('{').count();
    opens > 0 && opens == line.matches('}').count() && line.trim_end().ends_with('}')
}

fn find_closing_brace(lines: &[(usize, &str)], start: usize, name: &str) -> Result<usize, ScanError> {
    for (j, (_, line)) in lines.iter().enumerate().skip(start + 1) {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim_end() == "}" {
            return Ok(j);
        }
        if let Some(inner) = signature_name(line) {
            return Err(ScanError::Nested {
                name: inner,
                outer: name.to_string(),
                line: j + 1,
            });
        }
    }
    Err(ScanError::Unterminated {
        name: name.to_string(),
        line: start + 1,
    })
}
