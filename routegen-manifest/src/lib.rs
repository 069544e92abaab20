//! `routegen.toml` parsing and validation.
//!
//! The manifest is the input boundary of the generator: it carries the
//! project settings, the ordered list of operation descriptors produced by
//! the IDL translator, and optional template overrides.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    Manifest, ParseContext, ProjectConfig, RouteGenToml, TemplateOverride, parse_manifest,
};
pub use routegen_ir::{HttpMethod, OperationDescriptor, ParamBinding, ParamLocation};
