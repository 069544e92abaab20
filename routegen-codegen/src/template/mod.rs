//! Template registry and rendering.
//!
//! - [`TemplateSpec`] - A named template with delimiters, output path and merge strategy
//! - [`TemplateRegistry`] - Ordered template set, defaults plus manifest overrides
//! - [`TemplateRenderer`] - Strict rendering of bodies, output paths and route trees

mod registry;
mod renderer;
mod spec;

pub use registry::TemplateRegistry;
pub use renderer::{ROOT_VAR, TemplateRenderer};
pub use spec::{DEFAULT_DELIMS, TemplateSpec};
