use std::fs;
use std::path::Path;

use crate::config::GenerationConfig;
use crate::error::ConfigError;
use crate::paths::RunPaths;

/// Serialize the `terraform` section for the spec stage.
pub fn framework_config_yaml(config: &GenerationConfig) -> Result<String, ConfigError> {
    serde_yaml_ng::to_string(&config.terraform).map_err(|source| ConfigError::Serialization {
        what: "terraform config",
        source,
    })
}

/// Serialize the `oapi-codegen` section for the client stage.
pub fn client_config_yaml(config: &GenerationConfig) -> Result<String, ConfigError> {
    serde_yaml_ng::to_string(&config.client).map_err(|source| ConfigError::Serialization {
        what: "oapi-codegen config",
        source,
    })
}

/// Write both sub-configurations next to the main config file, replacing any
/// previous copies.
pub fn write_sub_configs(config: &GenerationConfig, paths: &RunPaths) -> Result<(), ConfigError> {
    write(&paths.framework_config, &framework_config_yaml(config)?)?;
    write(&paths.client_config, &client_config_yaml(config)?)?;
    Ok(())
}

fn write(path: &Path, content: &str) -> Result<(), ConfigError> {
    fs::write(path, content).map_err(|source| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
