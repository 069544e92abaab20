//! Core utilities and types for the routegen code generator.
//!
//! This crate provides the text and file primitives used across
//! the routegen workspace.

mod file;
mod utils;

// File operations
pub use file::{MergeStrategy, read_existing, write_atomic};
// String utilities
pub use utils::{indent_lines, sanitize_identifier, to_snake_case};
