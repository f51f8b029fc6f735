use std::path::{Component, Path, PathBuf};

/// Framework/spec-stage sub-configuration, written next to the config file.
pub const FRAMEWORK_CONFIG_FILE: &str = "tfconfig.yaml";

/// Client-stage sub-configuration, written next to the config file.
pub const CLIENT_CONFIG_FILE: &str = "oas.yaml";

/// Provider spec produced by the spec stage, written next to the config file.
pub const SPEC_ARTIFACT_FILE: &str = "provider-spec.json";

/// Directory under `base` holding the generated provider code.
pub const PROVIDER_DIR_NAME: &str = "provider";

/// Filesystem locations used by a single generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub repo_root: PathBuf,
    pub config_file: PathBuf,
    pub framework_config: PathBuf,
    pub client_config: PathBuf,
    pub spec_artifact: PathBuf,
    pub provider_root: PathBuf,
}

impl RunPaths {
    pub fn new(repo_root: &Path, config_file: &Path, base: &str) -> Self {
        let config_dir = config_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        Self {
            repo_root: repo_root.to_path_buf(),
            config_file: config_file.to_path_buf(),
            framework_config: config_dir.join(FRAMEWORK_CONFIG_FILE),
            client_config: config_dir.join(CLIENT_CONFIG_FILE),
            spec_artifact: config_dir.join(SPEC_ARTIFACT_FILE),
            provider_root: repo_root.join(base).join(PROVIDER_DIR_NAME),
        }
    }
}

/// Build a Go import path for `dir` inside the module rooted at `repo_root`.
///
/// - `("example.com/p", "/r", "/r/internal/clients")` → `"example.com/p/internal/clients"`
/// - `("example.com/p", "/r", "/r")` → `"example.com/p"`
///
/// Returns `None` when `dir` is not under `repo_root`.
pub fn go_import_path(module: &str, repo_root: &Path, dir: &Path) -> Option<String> {
    let relative = dir.strip_prefix(repo_root).ok()?;
    let mut path = module.trim_end_matches('/').to_string();
    for segment in path_segments(relative) {
        path.push('/');
        path.push_str(&segment);
    }
    Some(path)
}

/// Join `module` with the segments of a relative path like `base`, using `/`.
pub fn join_import_path(module: &str, relative: &str) -> String {
    let mut path = module.trim_end_matches('/').to_string();
    for segment in path_segments(Path::new(relative)) {
        path.push('/');
        path.push_str(&segment);
    }
    path
}

/// Import path of the generated client package, always `<module>/<base>/clients`.
///
/// Derived from the default client location, so a custom `output` in the
/// oapi-codegen options does not move it.
pub fn client_import_path(module: &str, repo_root: &Path, base: &str) -> String {
    let default_output = crate::config::default_client_output(repo_root, base);
    default_output
        .parent()
        .and_then(|dir| go_import_path(module, repo_root, dir))
        .unwrap_or_else(|| {
            join_import_path(module, &format!("{base}/{}", crate::config::CLIENT_DIR_NAME))
        })
}

fn path_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
