//! Generate operation - plan, guard and commit one generation run.

use std::path::Path;

use eyre::{Context, Result, bail};
use routegen_codegen::{
    generation::{GenerationPlan, Generator, StagedAction},
    route::{DisplayStyle, RouteTreeDisplay},
};
use routegen_manifest::Manifest;

use crate::reports::{GenerateReport, GenerationResult, PreviewResult, WrittenResult};

/// Template whose output marks an already generated project.
const REGISTER_TEMPLATE: &str = "register";

/// Whether the run creates a project or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateMode {
    New,
    Update,
}

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Output directory for generated code.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    pub mode: GenerateMode,
}

/// Execute the generate operation.
///
/// The whole plan is built and checked before anything is written, so a
/// failure leaves the output directory untouched.
pub fn generate(manifest: &Manifest, opts: GenerateOptions) -> Result<GenerateReport> {
    tracing::info!(
        mode = ?opts.mode,
        dry_run = opts.dry_run,
        output = %opts.output_dir.display(),
        "generating project"
    );
    let generator = Generator::from_manifest(manifest).wrap_err("Failed to load templates")?;
    let tree = generator.tree().wrap_err("Failed to build route tree")?;
    let plan = generator
        .plan(opts.output_dir)
        .wrap_err("Failed to plan generation")?;

    check_mode(&plan, opts.mode)?;

    let result = if opts.dry_run {
        GenerationResult::Preview(PreviewResult {
            files: plan.preview(),
        })
    } else {
        let stats = plan.commit().wrap_err("Failed to write generated files")?;
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            stats,
        })
    };

    Ok(GenerateReport {
        service: manifest.project.service.clone(),
        module: manifest.project.module.clone(),
        handler_count: tree.handler_count(),
        route_tree: RouteTreeDisplay::new(&tree)
            .style(DisplayStyle::TreeBox)
            .to_string(),
        result,
    })
}

/// `new` must not clobber an existing project and `update` needs one.
fn check_mode(plan: &GenerationPlan, mode: GenerateMode) -> Result<()> {
    let Some(register) = plan.file_for(REGISTER_TEMPLATE) else {
        tracing::warn!("no register file in plan; skipping project check");
        return Ok(());
    };
    match (mode, register.action) {
        (GenerateMode::New, StagedAction::Update | StagedAction::Unchanged) => bail!(
            "{} already exists; run `routegen update` to regenerate this project",
            register.path.display()
        ),
        (GenerateMode::Update, StagedAction::Create) => bail!(
            "{} not found; run `routegen new` to create the project first",
            register.path.display()
        ),
        _ => Ok(()),
    }
}
