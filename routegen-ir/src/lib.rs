//! Operation descriptor types for the routegen code generator.
//!
//! This crate provides the data model exchanged between the IDL front end
//! and the code generation engine. An external translator turns annotated
//! IDL into an ordered list of [`OperationDescriptor`]s; everything
//! downstream consumes only these types.
//!
//! # Architecture
//!
//! ```text
//! IDL → routegen.toml / translator → OperationDescriptor list → route tree → templates
//! ```
//!
//! The types are:
//! - Target-agnostic (no Go/Hertz specifics beyond method spelling)
//! - Plain data (validation lives with the consumers)

mod method;
mod operation;

pub use method::{HttpMethod, ParseMethodError};
pub use operation::{OperationDescriptor, ParamBinding, ParamLocation};
