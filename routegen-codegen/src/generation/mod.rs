//! Generation orchestration.
//!
//! - [`Generator`] - Build the tree and context, render and merge every output
//! - [`RenderContext`] - The data shared by all templates of one run
//! - [`GenerationPlan`] - Staged files, previewed or committed atomically

mod context;
mod generator;
mod plan;

pub use context::{
    ClientMethodInfo, ClientParam, GeneratorConfig, ImportSpec, MethodInfo, ProjectInfo,
    ROUTE_NODE_TEMPLATE, RenderContext,
};
pub use generator::Generator;
pub use plan::{GenerationPlan, PreviewFile, StagedAction, StagedFile, WriteStats};
