use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

use crate::error::ConfigError;

/// Config location relative to the repository root when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "generate/config.yaml";

/// Tag marking OpenAPI operations the provider implements itself, hidden from
/// the generated client.
pub const EXCLUDE_TAG: &str = "x-tf-ignore";

/// Go package name of the generated client when none is configured.
pub const DEFAULT_CLIENT_PACKAGE: &str = "clients";

/// Directory under `base` that receives the generated client.
pub const CLIENT_DIR_NAME: &str = "clients";

/// File name of the generated client when no `output` is configured.
pub const CLIENT_FILE_NAME: &str = "clients.gen.go";

/// Top-level configuration loaded from `generate/config.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub generator: GeneratorSection,
    /// Options forwarded to oapi-codegen.
    #[serde(rename = "oapi-codegen", default)]
    pub client: ClientOptions,
    /// Options forwarded to the terraform spec generator, passed through untouched.
    #[serde(default)]
    pub terraform: IndexMap<String, Value>,
}

/// The `generator` section: options consumed by this tool itself.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSection {
    /// Output root inside the repository, e.g. `internal`.
    #[serde(default)]
    pub base: String,
    /// Path to the OpenAPI document, passed verbatim to the spec and client stages.
    #[serde(rename = "oasPath")]
    pub oas_path: PathBuf,
    #[serde(default)]
    pub tools: ToolOverrides,
}

/// Per-stage command prefixes replacing the default `go run ...@latest` invocations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolOverrides {
    pub spec: Option<Vec<String>>,
    pub framework: Option<Vec<String>>,
    pub client: Option<Vec<String>>,
}

/// The `oapi-codegen` section. Known keys are typed; everything else is kept
/// in `extra` and written back out in its original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate: Option<GenerateOptions>,
    #[serde(rename = "output-options", skip_serializing_if = "Option::is_none")]
    pub output_options: Option<OutputOptions>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// oapi-codegen `generate` flags. Unset flags are left out of `oas.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<bool>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl GenerateOptions {
    /// Models and client, the pair the scaffold stubs rely on.
    pub fn models_and_client() -> Self {
        Self {
            models: Some(true),
            client: Some(true),
            extra: IndexMap::new(),
        }
    }
}

/// oapi-codegen `output-options`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputOptions {
    #[serde(
        rename = "exclude-tags",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exclude_tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Load config from a YAML file.
pub fn load_config(path: &Path) -> Result<GenerationConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let config: GenerationConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

/// Default location of the generated client: `<repo>/<base>/clients/clients.gen.go`.
pub fn default_client_output(repo_root: &Path, base: &str) -> PathBuf {
    repo_root
        .join(base)
        .join(CLIENT_DIR_NAME)
        .join(CLIENT_FILE_NAME)
}

impl GenerationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let tools = &self.generator.tools;
        for (stage, command) in [
            ("spec", &tools.spec),
            ("framework", &tools.framework),
            ("client", &tools.client),
        ] {
            if command.as_ref().is_some_and(Vec::is_empty) {
                return Err(ConfigError::Invalid(format!(
                    "generator.tools.{stage} must name a command"
                )));
            }
        }
        if self.generator.oas_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "generator.oasPath must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Fill absent client options with defaults. Explicit values are kept as
    /// written, except that the exclude-tag sentinel is always present afterwards.
    pub fn normalize(&mut self, repo_root: &Path) {
        let client = &mut self.client;

        if client.output.is_none() {
            client.output = Some(default_client_output(repo_root, &self.generator.base));
        }

        if client.generate.is_none() {
            client.generate = Some(GenerateOptions::models_and_client());
        }

        if client.package.as_deref().is_none_or(str::is_empty) {
            client.package = Some(DEFAULT_CLIENT_PACKAGE.to_string());
        }

        let tags = client
            .output_options
            .get_or_insert_with(OutputOptions::default)
            .exclude_tags
            .get_or_insert_with(Vec::new);
        if !tags.iter().any(|tag| tag == EXCLUDE_TAG) {
            tags.push(EXCLUDE_TAG.to_string());
        }
    }

    /// Where the generated client file goes, falling back to the default layout
    /// when the config has not been normalized yet. A relative `output` is
    /// returned as written: it is relative to the working directory the client
    /// tool runs in.
    pub fn client_output(&self, repo_root: &Path) -> PathBuf {
        match &self.client.output {
            Some(path) => path.clone(),
            None => default_client_output(repo_root, &self.generator.base),
        }
    }

    /// Create the directory that will hold the generated client.
    pub fn create_client_output_dir(&self, repo_root: &Path) -> Result<PathBuf, ConfigError> {
        let output = self.client_output(repo_root);
        let dir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir).map_err(|source| ConfigError::DirectoryCreate {
            path: dir.clone(),
            source,
        })?;
        log::debug!("client output directory ready: {}", dir.display());
        Ok(dir)
    }
}
