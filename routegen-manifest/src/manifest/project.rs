use routegen_core::to_snake_case;
use serde::Deserialize;

/// Project settings from the `[project]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Go module path of the generated project (e.g. `github.com/acme/demo`).
    pub module: String,
    /// Service name, used for handler file and client type names.
    pub service: String,
    /// Default package name for router, handler and model packages.
    pub package: String,
    /// Handler package name (defaults to `package`).
    #[serde(default)]
    pub handler_package: Option<String>,
    /// Router package name (defaults to `package`).
    #[serde(default)]
    pub router_package: Option<String>,
    /// Model package name (defaults to `package`).
    #[serde(default)]
    pub model_package: Option<String>,
    /// Domain used to build the default IDL client host.
    #[serde(default)]
    pub base_domain: Option<String>,
    /// Encode enum query parameters as integers in generated clients.
    #[serde(default)]
    pub query_enum_as_int: bool,
}

impl ProjectConfig {
    pub fn handler_package(&self) -> &str {
        self.handler_package.as_deref().unwrap_or(&self.package)
    }

    pub fn router_package(&self) -> &str {
        self.router_package.as_deref().unwrap_or(&self.package)
    }

    pub fn model_package(&self) -> &str {
        self.model_package.as_deref().unwrap_or(&self.package)
    }

    pub fn base_domain(&self) -> &str {
        self.base_domain.as_deref().unwrap_or(&self.package)
    }

    /// File stem for per-service files (e.g. `DemoService` -> `demo_service`).
    pub fn service_file(&self) -> String {
        to_snake_case(&self.service)
    }
}
