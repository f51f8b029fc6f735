use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::Stage;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialization {
        what: &'static str,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("no go.mod found in {} or any parent directory", start.display())]
    NotFound { start: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} has no module directive", path.display())]
    MissingDirective { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{stage} stage could not be started: {source}")]
    Launch {
        stage: Stage,
        #[source]
        source: io::Error,
    },

    #[error("{stage} stage failed ({status})")]
    Stage {
        stage: Stage,
        status: String,
        output: String,
    },
}

impl PipelineError {
    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Launch { stage, .. } | Self::Stage { stage, .. } => *stage,
        }
    }
}

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("provider spec {} was not produced: {source}", path.display())]
    Missing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode provider spec {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
