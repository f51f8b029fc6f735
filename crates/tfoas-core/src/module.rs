use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ModuleError;

/// Marker file identifying the root of a Go module.
pub const MODULE_FILE: &str = "go.mod";

/// A Go module: where it lives and the import path it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModule {
    pub root: PathBuf,
    pub name: String,
}

impl GoModule {
    /// Load the module rooted at `root`.
    pub fn open(root: &Path) -> Result<Self, ModuleError> {
        Ok(Self {
            root: root.to_path_buf(),
            name: read_module_name(root)?,
        })
    }

    /// Load the module containing `start`, searching upward.
    pub fn discover(start: &Path) -> Result<Self, ModuleError> {
        let root = find_module_root(start)?;
        Self::open(&root)
    }
}

/// Find the nearest directory at or above `start` that contains `go.mod`.
pub fn find_module_root(start: &Path) -> Result<PathBuf, ModuleError> {
    start
        .ancestors()
        .find(|dir| dir.join(MODULE_FILE).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| ModuleError::NotFound {
            start: start.to_path_buf(),
        })
}

/// Read the `module` directive from `<root>/go.mod`.
pub fn read_module_name(root: &Path) -> Result<String, ModuleError> {
    let path = root.join(MODULE_FILE);
    let content = fs::read_to_string(&path).map_err(|source| ModuleError::Read {
        path: path.clone(),
        source,
    })?;
    parse_module_directive(&content).ok_or(ModuleError::MissingDirective { path })
}

fn parse_module_directive(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let rest = rest.split("//").next().unwrap_or_default().trim();
        let name = rest.trim_matches(|c| c == '"' || c == '`');
        (!name.is_empty()).then(|| name.to_string())
    })
}
