pub mod config;
pub mod error;
pub mod module;
pub mod naming;
pub mod paths;
pub mod pipeline;
pub mod spec;
pub mod split;

use std::path::PathBuf;

/// A generated file with path (relative to its output root) and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Trait for generators that turn a provider spec into source files.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        spec: &spec::ProviderSpecification,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
