use minijinja::syntax::SyntaxConfig;
use routegen_core::MergeStrategy;

/// Default variable delimiters.
pub const DEFAULT_DELIMS: [&str; 2] = ["{{", "}}"];

/// A named template with its output rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    /// Stable registry name (`router`, `handler`, ...).
    pub name: String,
    /// Output path pattern, itself rendered as a template. `None` marks a
    /// partial that is only included by other templates.
    pub path: Option<String>,
    /// Variable delimiter pair.
    pub delims: [String; 2],
    pub body: String,
    /// How the rendered output merges with an existing file.
    pub strategy: MergeStrategy,
}

impl TemplateSpec {
    /// Create a partial with default delimiters that overwrites its output.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            delims: DEFAULT_DELIMS.map(String::from),
            body: body.into(),
            strategy: MergeStrategy::Overwrite,
        }
    }

    /// Set the output path pattern.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the variable delimiters.
    pub fn delims(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.delims = [open.into(), close.into()];
        self
    }

    /// Set the merge strategy.
    pub fn strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns true if the template produces no file of its own.
    pub fn is_partial(&self) -> bool {
        self.path.is_none()
    }

    /// Returns true if the body renders to nothing regardless of context.
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Engine syntax for this template's delimiters.
    ///
    /// Block tags are `{% %}` and comments `{# #}`, except when the variable
    /// delimiters take one of those openers; the colliding pair then moves
    /// to `<% %>` or `<# #>`.
    pub(crate) fn syntax(&self) -> Result<SyntaxConfig, minijinja::Error> {
        let [open, close] = &self.delims;
        let (block_open, block_close) = if open == "{%" {
            ("<%", "%>")
        } else {
            ("{%", "%}")
        };
        let (comment_open, comment_close) = if open == "{#" {
            ("<#", "#>")
        } else {
            ("{#", "#}")
        };

        SyntaxConfig::builder()
            .block_delimiters(block_open, block_close)
            .variable_delimiters(open.clone(), close.clone())
            .comment_delimiters(comment_open, comment_close)
            .build()
    }
}
