use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("failed to load template {name}: {source}")]
    TemplateLoad {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to render {}: {source}", path.display())]
    TemplateRender {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error("resource {0:?} appears more than once in the provider spec")]
    DuplicateResource(String),

    #[error("failed to create {}: {source}", path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
