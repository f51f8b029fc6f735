//! The provider spec written by the spec stage.
//!
//! Only the parts needed to name generated stubs are decoded; schemas,
//! data sources and the spec version are owned by the external tooling and
//! skipped.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::SpecError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderSpecification {
    pub provider: ProviderDescriptor,
    #[serde(default)]
    pub resources: Vec<ResourceDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderDescriptor {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceDescriptor {
    pub name: String,
}

/// Read and decode the provider spec at `path`.
pub fn load_spec(path: &Path) -> Result<ProviderSpecification, SpecError> {
    let content = fs::read_to_string(path).map_err(|source| SpecError::Missing {
        path: path.to_path_buf(),
        source,
    })?;
    let spec: ProviderSpecification =
        serde_json::from_str(&content).map_err(|source| SpecError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!(
        "provider spec {}: provider {:?}, {} resources",
        path.display(),
        spec.provider.name,
        spec.resources.len()
    );
    Ok(spec)
}
