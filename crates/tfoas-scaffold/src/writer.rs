use std::fs;
use std::path::{Path, PathBuf};

use tfoas_core::GeneratedFile;

use crate::error::ScaffoldError;

/// Write generated files under `base`, creating or truncating each target.
/// Stops at the first failure; files already written stay on disk.
pub fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, ScaffoldError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ScaffoldError::FileCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.content).map_err(|source| ScaffoldError::FileCreate {
            path: path.clone(),
            source,
        })?;
        log::info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
