//! Route tree display formatting.
//!
//! # Example
//!
//! ```ignore
//! use routegen_codegen::route::{DisplayStyle, RouteTreeDisplay};
//!
//! let display = RouteTreeDisplay::new(&root).style(DisplayStyle::Flat);
//! println!("{}", display);
//! ```

use std::fmt;

use super::RouteNode;

/// Display style for route trees.
#[derive(Debug, Clone, Copy, Default)]
pub enum DisplayStyle {
    /// Tree structure with box-drawing characters and bound handlers.
    ///
    /// ```text
    /// /
    /// └─ /users (GET ListUsers, POST CreateUser)
    ///    └─ /:id (GET GetUser)
    /// ```
    #[default]
    TreeBox,

    /// One line per handler with the full path.
    ///
    /// ```text
    /// GET     /users      ListUsers
    /// POST    /users      CreateUser
    /// GET     /users/:id  GetUser
    /// ```
    Flat,
}

/// Declarative route tree display formatter.
#[derive(Debug, Clone)]
pub struct RouteTreeDisplay<'a> {
    root: &'a RouteNode,
    style: DisplayStyle,
}

impl<'a> RouteTreeDisplay<'a> {
    pub fn new(root: &'a RouteNode) -> Self {
        Self {
            root,
            style: DisplayStyle::default(),
        }
    }

    /// Set the display style.
    pub fn style(mut self, style: DisplayStyle) -> Self {
        self.style = style;
        self
    }

    /// Render the route tree to a string.
    pub fn render(&self) -> String {
        let mut output = String::new();
        match self.style {
            DisplayStyle::TreeBox => self.render_tree_box(&mut output),
            DisplayStyle::Flat => self.render_flat(&mut output),
        }
        output
    }

    fn render_tree_box(&self, output: &mut String) {
        output.push_str(&self.root.path);
        push_handlers(output, self.root);
        output.push('\n');

        let total = self.root.children.len();
        for (i, child) in self.root.children.iter().enumerate() {
            Self::render_tree_box_recursive(output, child, "", i == total - 1);
        }
    }

    fn render_tree_box_recursive(output: &mut String, node: &RouteNode, prefix: &str, is_last: bool) {
        let connector = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        output.push_str(prefix);
        output.push_str(connector);
        output.push(' ');
        output.push_str(&node.segment);
        push_handlers(output, node);
        output.push('\n');

        let total = node.children.len();
        let new_prefix = format!("{}{}", prefix, child_prefix);
        for (i, child) in node.children.iter().enumerate() {
            Self::render_tree_box_recursive(output, child, &new_prefix, i == total - 1);
        }
    }

    fn render_flat(&self, output: &mut String) {
        let rows: Vec<_> = self
            .root
            .walk()
            .flat_map(|node| node.handlers.iter().map(move |h| (h, node.path.as_str())))
            .collect();
        let width = rows.iter().map(|(_, path)| path.len()).max().unwrap_or(0);

        for (handler, path) in rows {
            output.push_str(&format!(
                "{:<8}{:<width$}  {}\n",
                handler.method.as_str(),
                path,
                handler.name,
                width = width
            ));
        }
    }
}

fn push_handlers(output: &mut String, node: &RouteNode) {
    if node.handlers.is_empty() {
        return;
    }
    let handlers: Vec<_> = node
        .handlers
        .iter()
        .map(|h| format!("{} {}", h.method, h.name))
        .collect();
    output.push_str(" (");
    output.push_str(&handlers.join(", "));
    output.push(')');
}

impl fmt::Display for RouteTreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output = self.render();
        // Remove trailing newline for Display
        write!(f, "{}", output.trim_end())
    }
}
