//! Route tree construction.
//!
//! - [`RouteTreeBuilder`] - Groups an ordered descriptor list by shared path prefix
//! - [`RouteNode`] - One node of the resulting tree
//! - [`RouteTreeDisplay`] - Human-readable rendering for the `tree` command

mod builder;
mod display;
mod node;

pub use builder::RouteTreeBuilder;
pub use display::{DisplayStyle, RouteTreeDisplay};
pub use node::{RouteHandler, RouteNode, Walk};
