//! Validation of manifest names and operations.

use miette::SourceSpan;
use routegen_ir::OperationDescriptor;

use crate::{Result, SourceContext};

/// Parsing and validation context that carries source information.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "routegen.toml");
/// ctx.validate_name("demo", "package")?;
/// ctx.validate_operation(0, &op)?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: SourceContext,
    /// Table path for nested validation (e.g., ["templates", "handler"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self {
            source: SourceContext::new(src, filename),
            path: Vec::new(),
        }
    }

    /// Get the source context.
    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: self.source.clone(),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "delimiter in 'templates.handler'" or just "package".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Validate that a name is a valid Go identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        let span = find_value_span(self.source.src(), name);

        if is_go_keyword(name) {
            return Err(self
                .source
                .reserved_keyword_error(name, self.context_for(kind), span));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                span,
            ));
        }

        Ok(())
    }

    /// Validate descriptor invariants for the operation at `index`.
    pub fn validate_operation(&self, index: usize, op: &OperationDescriptor) -> Result<()> {
        if let Some(reason) = op.invalid_reason() {
            let span = find_key_value_span(self.source.src(), "path", &op.path);
            return Err(self.source.invalid_operation_error(index, reason, span));
        }
        if op.has_handler() {
            self.push("operations").validate_name(&op.handler, "handler")?;
        }
        Ok(())
    }

    /// Validate a template delimiter pair.
    pub fn validate_delims(&self, delims: &[String; 2]) -> Result<()> {
        let [open, close] = delims;
        if open.trim().is_empty() || close.trim().is_empty() {
            return Err(self.source.validation_error(
                format!("{} must not be blank", self.context_for("delimiter")),
                find_value_span(self.source.src(), open),
            ));
        }
        if open == close {
            return Err(self.source.validation_error(
                format!(
                    "{} pair uses '{}' for both sides",
                    self.context_for("delimiter"),
                    open
                ),
                find_value_span(self.source.src(), open),
            ));
        }
        Ok(())
    }
}

/// Go reserved keywords that cannot be used as identifiers
pub(crate) const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Check if a name is a Go reserved keyword
pub(crate) fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

/// Find the span of a quoted string value in the TOML source.
fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{value}{quote}");
        if let Some(pos) = src.find(&pattern) {
            // +1 to skip the opening quote
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }
    None
}

/// Find the span of `key = "value"` in the TOML source, pointing at the value.
pub(crate) fn find_key_value_span(src: &str, key: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{key} = {quote}{value}{quote}");
        if let Some(pos) = src.find(&pattern) {
            let start = pos + key.len() + 4;
            return Some(SourceSpan::from((start, value.len())));
        }
    }
    None
}

/// Validate that a name is a valid Go identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}
