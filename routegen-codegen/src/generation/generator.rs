use std::path::Path;

use indexmap::IndexSet;
use minijinja::Value;
use routegen_core::read_existing;
use routegen_manifest::Manifest;

use super::{
    GenerationPlan, GeneratorConfig, ProjectInfo, RenderContext, StagedAction, StagedFile,
};
use crate::{
    GenerateError, Result,
    merge::merge,
    route::{RouteNode, RouteTreeBuilder},
    template::{TemplateRegistry, TemplateRenderer},
};

/// Turns a manifest into a [`GenerationPlan`].
///
/// # Example
///
/// ```ignore
/// let generator = Generator::from_manifest(&manifest)?;
/// let plan = generator.plan(".")?;
/// let stats = plan.commit()?;
/// ```
pub struct Generator<'m> {
    manifest: &'m Manifest,
    registry: TemplateRegistry,
}

impl<'m> Generator<'m> {
    pub fn new(manifest: &'m Manifest, registry: TemplateRegistry) -> Self {
        Self { manifest, registry }
    }

    /// Create a generator using the default templates and the manifest's
    /// template overrides.
    pub fn from_manifest(manifest: &'m Manifest) -> Result<Self> {
        let registry = TemplateRegistry::from_overrides(&manifest.templates)?;
        Ok(Self::new(manifest, registry))
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Build the route tree for the manifest's operations.
    pub fn tree(&self) -> Result<RouteNode> {
        RouteTreeBuilder::build(&self.manifest.operations)
    }

    /// Build the shared template context.
    pub fn context(&self) -> Result<RenderContext> {
        let project = ProjectInfo::from_config(&self.manifest.project);
        let config = GeneratorConfig {
            query_enum_as_int: self.manifest.project.query_enum_as_int,
        };
        let renderer = TemplateRenderer::new(&self.registry);
        RenderContext::build(project, config, self.tree()?, &renderer)
    }

    /// Render and merge every output file against the contents of
    /// `output_dir`.
    ///
    /// Existing files are read but never written; the first error aborts the
    /// whole plan.
    pub fn plan(&self, output_dir: impl AsRef<Path>) -> Result<GenerationPlan> {
        let output_dir = output_dir.as_ref();
        let renderer = TemplateRenderer::new(&self.registry);
        let context = Value::from_serialize(self.context()?);

        let mut seen: IndexSet<String> = IndexSet::new();
        let mut files = Vec::new();

        for spec in self.registry.outputs() {
            let Some(relative) = renderer.render_path(&spec.name, &context)? else {
                continue;
            };
            let fresh = renderer.render(&spec.name, &context)?;
            if fresh.trim().is_empty() {
                tracing::debug!(template = %spec.name, "skipping empty render");
                continue;
            }

            let path = output_dir.join(&relative);
            if !seen.insert(relative.clone()) {
                return Err(GenerateError::conflict(
                    path,
                    format!("template '{}' renders to a path already in use", spec.name),
                ));
            }

            let existing = read_existing(&path).map_err(|source| GenerateError::Io {
                path: path.clone(),
                source,
            })?;
            let content = merge(existing.as_deref(), &fresh, spec.strategy, &path)?;
            let action = match existing.as_deref() {
                None => StagedAction::Create,
                Some(current) if current == content => StagedAction::Unchanged,
                Some(_) => StagedAction::Update,
            };

            tracing::debug!(
                template = %spec.name,
                path = %relative,
                %action,
                "staged file"
            );
            files.push(StagedFile {
                path,
                relative,
                template: spec.name.clone(),
                strategy: spec.strategy,
                content,
                action,
            });
        }

        tracing::info!(files = files.len(), root = %output_dir.display(), "planned generation");
        Ok(GenerationPlan::new(output_dir.to_path_buf(), files))
    }
}

#[cfg(test)]
mod tests {
    use routegen_core::MergeStrategy;
    use tempfile::TempDir;

    use super::*;
    use crate::template::TemplateSpec;

    const MANIFEST: &str = r#"
[project]
module = "github.com/acme/demo"
service = "Demo"
package = "demo"

[[operations]]
method = "GET"
path = "/ping"
handler = "Ping"
"#;

    fn manifest() -> Manifest {
        MANIFEST.parse().unwrap()
    }

    #[test]
    fn test_plan_default_outputs() {
        let temp = TempDir::new().unwrap();
        let manifest = manifest();
        let plan = Generator::from_manifest(&manifest)
            .unwrap()
            .plan(temp.path())
            .unwrap();

        let paths: Vec<_> = plan.files().iter().map(|f| f.relative.as_str()).collect();
        assert_eq!(
            paths,
            [
                "biz/router/demo/demo.go",
                "biz/router/demo/middleware.go",
                "biz/handler/demo/demo.go",
                "biz/router/register.go",
                "biz/client/client.go",
                "biz/client/demo/hertz_client.go",
                "biz/client/demo/demo_client.go",
            ]
        );
        assert!(
            plan.files()
                .iter()
                .all(|f| f.action == StagedAction::Create)
        );
        // Planning never writes.
        assert!(std::fs::read_dir(temp.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_duplicate_output_path() {
        let manifest = manifest();
        let mut registry = TemplateRegistry::with_defaults();
        registry.register(
            TemplateSpec::new("shadow", "package demo\n").path("biz/router/register.go"),
        );

        let err = match Generator::new(&manifest, registry).plan("out") {
            Ok(_) => panic!("expected a conflict"),
            Err(err) => err,
        };
        match err {
            GenerateError::MergeConflict { path, reason } => {
                assert!(path.ends_with("biz/router/register.go"));
                assert!(reason.contains("shadow"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_existing_file_is_merged() {
        let temp = TempDir::new().unwrap();
        let manifest = manifest();
        let mut registry = TemplateRegistry::new();
        registry.register(
            TemplateSpec::new("notes", "{{ service }} notes\n")
                .path("NOTES.txt")
                .strategy(MergeStrategy::IfMissing),
        );
        std::fs::write(temp.path().join("NOTES.txt"), "mine\n").unwrap();

        let plan = Generator::new(&manifest, registry).plan(temp.path()).unwrap();
        let notes = &plan.files()[0];
        assert_eq!(notes.action, StagedAction::Unchanged);
        assert_eq!(notes.content, "mine\n");
        assert!(!plan.has_changes());
    }

    #[test]
    fn test_render_error_names_template() {
        let manifest = manifest();
        let mut registry = TemplateRegistry::with_defaults();
        registry.register(TemplateSpec::new("broken", "{{ missing }}").path("x.go"));

        let err = match Generator::new(&manifest, registry).plan("out") {
            Ok(_) => panic!("expected a render error"),
            Err(err) => err,
        };
        assert!(matches!(err, GenerateError::Render { template, .. } if template == "broken"));
    }
}
