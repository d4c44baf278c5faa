use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use crate::config::ConfigError;

/// File extension of the per-project documents read in direct mode.
pub const PROJECT_EXTENSION: &str = "csproj";

/// Name of the shared version manifest read in central mode.
pub const CENTRAL_MANIFEST: &str = "Directory.Packages.props";

/// Recursively find every `*.csproj` under `root`, sorted by path.
pub fn find_project_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(PROJECT_EXTENSION))
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    log::debug!("found {} project file(s) under {}", files.len(), root.display());
    Ok(files)
}

/// Locate `Directory.Packages.props` directly in `root`.
pub fn find_central_manifest(root: &Path) -> Result<PathBuf, ConfigError> {
    let manifest = root.join(CENTRAL_MANIFEST);
    if manifest.is_file() {
        Ok(manifest)
    } else {
        Err(ConfigError::MissingCentralManifest(manifest))
    }
}
