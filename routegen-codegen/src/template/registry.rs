//! Ordered registry of named templates.
//!
//! The registry starts from the default Go/Hertz template set and accepts
//! overrides from `routegen.toml`: an entry whose name matches a registered
//! template replaces the fields it sets, any other name is appended as a
//! custom template.

use indexmap::IndexMap;
use routegen_core::MergeStrategy;
use routegen_manifest::TemplateOverride;

use super::TemplateSpec;
use crate::{GenerateError, Result};

/// Templates keyed by name, in registration order.
///
/// Output files are produced in this order, so it is part of the
/// generator's deterministic output.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: IndexMap<String, TemplateSpec>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default Go/Hertz template set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            TemplateSpec::new("router", include_str!("../../templates/router.go.j2"))
                .path("biz/router/{{ router_package }}/{{ router_package }}.go"),
        );
        registry.register(TemplateSpec::new(
            "route_node",
            include_str!("../../templates/route_node.go.j2"),
        ));
        registry.register(
            TemplateSpec::new("middleware", include_str!("../../templates/middleware.go.j2"))
                .path("biz/router/{{ router_package }}/middleware.go")
                .strategy(MergeStrategy::PreserveSymbols),
        );
        registry.register(
            TemplateSpec::new("handler", include_str!("../../templates/handler.go.j2"))
                .path("biz/handler/{{ handler_package }}/{{ service_file }}.go")
                .strategy(MergeStrategy::PreserveSymbols),
        );
        // Reserves the model package; model sources come from the IDL compiler.
        registry.register(
            TemplateSpec::new("model", "").path("biz/model/{{ model_package }}/model.go"),
        );
        registry.register(
            TemplateSpec::new("register", include_str!("../../templates/register.go.j2"))
                .path("biz/router/register.go")
                .strategy(MergeStrategy::MarkerAppend),
        );
        registry.register(
            TemplateSpec::new("client", include_str!("../../templates/client.go.j2"))
                .path("biz/client/client.go")
                .strategy(MergeStrategy::IfMissing),
        );
        registry.register(
            TemplateSpec::new(
                "hertz_client",
                include_str!("../../templates/hertz_client.go.j2"),
            )
            .path("biz/client/{{ router_package }}/hertz_client.go"),
        );
        registry.register(
            TemplateSpec::new("idl_client", include_str!("../../templates/idl_client.go.j2"))
                .path("biz/client/{{ router_package }}/{{ service_file }}_client.go"),
        );
        registry
    }

    /// Default templates with the manifest's overrides applied.
    pub fn from_overrides(overrides: &IndexMap<String, TemplateOverride>) -> Result<Self> {
        let mut registry = Self::with_defaults();
        registry.apply_overrides(overrides)?;
        Ok(registry)
    }

    /// Register a template, replacing any template of the same name in place.
    pub fn register(&mut self, spec: TemplateSpec) -> Option<TemplateSpec> {
        self.templates.insert(spec.name.clone(), spec)
    }

    /// Apply `[templates.<name>]` entries.
    ///
    /// Bodies loaded from `body_file` must already be resolved into `body`.
    pub fn apply_overrides(&mut self, overrides: &IndexMap<String, TemplateOverride>) -> Result<()> {
        for (name, entry) in overrides {
            if let (None, Some(file)) = (&entry.body, &entry.body_file) {
                return Err(GenerateError::Render {
                    template: name.clone(),
                    message: format!("body file '{}' has not been loaded", file.display()),
                });
            }

            let spec = match self.templates.get(name) {
                Some(current) => overridden(current.clone(), entry),
                None => {
                    let Some(body) = &entry.body else {
                        return Err(GenerateError::Render {
                            template: name.clone(),
                            message: "custom template has no body".to_string(),
                        });
                    };
                    overridden(TemplateSpec::new(name.clone(), body.clone()), entry)
                }
            };

            tracing::debug!(
                template = %name,
                custom = !self.templates.contains_key(name),
                "applying template override"
            );
            self.register(spec);
        }
        Ok(())
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Option<&TemplateSpec> {
        self.templates.get(name)
    }

    /// Check whether a template is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// All templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TemplateSpec> {
        self.templates.values()
    }

    /// Templates that produce an output file, in registration order.
    pub fn outputs(&self) -> impl Iterator<Item = &TemplateSpec> {
        self.iter().filter(|spec| !spec.is_partial())
    }

    /// Get the number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn overridden(mut spec: TemplateSpec, entry: &TemplateOverride) -> TemplateSpec {
    if let Some(path) = &entry.path {
        spec.path = Some(path.clone());
    }
    if let Some(delims) = &entry.delims {
        spec.delims = delims.clone();
    }
    if let Some(body) = &entry.body {
        spec.body = body.clone();
    }
    if let Some(strategy) = entry.strategy {
        spec.strategy = strategy;
    }
    spec
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn names(registry: &TemplateRegistry) -> Vec<&str> {
        registry.iter().map(|spec| spec.name.as_str()).collect()
    }

    #[test]
    fn test_default_order() {
        let registry = TemplateRegistry::with_defaults();
        assert_eq!(
            names(&registry),
            [
                "router",
                "route_node",
                "middleware",
                "handler",
                "model",
                "register",
                "client",
                "hertz_client",
                "idl_client"
            ]
        );

        let outputs: Vec<_> = registry.outputs().map(|s| s.name.as_str()).collect();
        assert!(!outputs.contains(&"route_node"));
        assert_eq!(outputs.len(), 8);
    }

    #[test]
    fn test_default_strategies() {
        let registry = TemplateRegistry::with_defaults();
        let strategy = |name: &str| registry.get(name).unwrap().strategy;

        assert_eq!(strategy("router"), MergeStrategy::Overwrite);
        assert_eq!(strategy("middleware"), MergeStrategy::PreserveSymbols);
        assert_eq!(strategy("handler"), MergeStrategy::PreserveSymbols);
        assert_eq!(strategy("register"), MergeStrategy::MarkerAppend);
        assert_eq!(strategy("client"), MergeStrategy::IfMissing);
        assert!(registry.get("model").unwrap().is_blank());
    }

    #[test]
    fn test_override_keeps_position() {
        let mut overrides = IndexMap::new();
        overrides.insert(
            "handler".to_string(),
            TemplateOverride {
                body: Some("package [[ handler_package ]]\n".to_string()),
                delims: Some(["[[".to_string(), "]]".to_string()]),
                ..Default::default()
            },
        );

        let registry = TemplateRegistry::from_overrides(&overrides).unwrap();
        assert_eq!(names(&registry)[3], "handler");

        let handler = registry.get("handler").unwrap();
        assert_eq!(handler.body, "package [[ handler_package ]]\n");
        assert_eq!(handler.delims, ["[[", "]]"]);
        // Unset fields keep their defaults.
        assert_eq!(handler.strategy, MergeStrategy::PreserveSymbols);
        assert_eq!(
            handler.path.as_deref(),
            Some("biz/handler/{{ handler_package }}/{{ service_file }}.go")
        );
    }

    #[test]
    fn test_custom_template_is_appended() {
        let mut overrides = IndexMap::new();
        overrides.insert(
            "readme".to_string(),
            TemplateOverride {
                path: Some("README.md".to_string()),
                body: Some("# {{ service }}\n".to_string()),
                strategy: Some(MergeStrategy::IfMissing),
                ..Default::default()
            },
        );

        let registry = TemplateRegistry::from_overrides(&overrides).unwrap();
        assert_eq!(names(&registry).last(), Some(&"readme"));

        let readme = registry.get("readme").unwrap();
        assert_eq!(readme.strategy, MergeStrategy::IfMissing);
        assert_eq!(readme.delims, ["{{", "}}"]);
    }

    #[test]
    fn test_custom_template_requires_body() {
        let mut overrides = IndexMap::new();
        overrides.insert(
            "readme".to_string(),
            TemplateOverride {
                path: Some("README.md".to_string()),
                ..Default::default()
            },
        );

        let err = TemplateRegistry::from_overrides(&overrides).unwrap_err();
        assert!(matches!(err, GenerateError::Render { template, .. } if template == "readme"));
    }

    #[test]
    fn test_unresolved_body_file() {
        let mut overrides = IndexMap::new();
        overrides.insert(
            "router".to_string(),
            TemplateOverride {
                body_file: Some(PathBuf::from("router.tpl")),
                ..Default::default()
            },
        );

        let err = TemplateRegistry::from_overrides(&overrides).unwrap_err();
        assert!(err.to_string().contains("router.tpl"));
    }
}
