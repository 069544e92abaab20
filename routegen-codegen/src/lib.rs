//! Route tree construction, template rendering and incremental merging
//! for the routegen code generator.
//!
//! # Module Organization
//!
//! - [`route`] - Route tree building and display (RouteTreeBuilder, RouteNode, etc.)
//! - [`naming`] - Tree-wide unique group and middleware names
//! - [`template`] - Template registry and renderer (TemplateRegistry, TemplateRenderer)
//! - [`merge`] - Merging fresh renders into existing files (merge, SymbolScanner, etc.)
//! - [`generation`] - Planning and committing a run (Generator, GenerationPlan)
//!
//! Data flows one way: descriptors → tree → rendered text → merged text →
//! staged plan → disk. Only [`generation::GenerationPlan::commit`] writes.

mod error;
pub mod generation;
pub mod merge;
pub mod naming;
pub mod route;
pub mod template;

pub use error::{GenerateError, Result};
