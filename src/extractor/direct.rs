use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::discovery::find_project_files;
use crate::models::DependencyDeclaration;

/// Reads `<PackageReference Include="..." Version="..." />` from each project file.
pub struct DirectExtractor;

impl DirectExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl super::Extractor for DirectExtractor {
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        find_project_files(root)
    }

    fn extract(&self, document: &Path) -> Result<Vec<DependencyDeclaration>> {
        let content = std::fs::read_to_string(document)
            .with_context(|| format!("failed to read {}", document.display()))?;
        let deps = super::xml::read_package_elements(&content, "PackageReference")
            .with_context(|| format!("failed to parse {}", document.display()))?;
        log::debug!("{}: {} package reference(s)", document.display(), deps.len());
        Ok(deps)
    }
}
