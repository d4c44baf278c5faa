use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::discovery::find_central_manifest;
use crate::models::DependencyDeclaration;

/// Reads `<PackageVersion Include="..." Version="..." />` pins from the single
/// `Directory.Packages.props` at the scan root.
pub struct CentralExtractor;

impl CentralExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl super::Extractor for CentralExtractor {
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(vec![find_central_manifest(root)?])
    }

    fn extract(&self, document: &Path) -> Result<Vec<DependencyDeclaration>> {
        let content = std::fs::read_to_string(document)
            .with_context(|| format!("failed to read {}", document.display()))?;
        let deps = super::xml::read_package_elements(&content, "PackageVersion")
            .with_context(|| format!("failed to parse {}", document.display()))?;
        log::debug!("{}: {} package version pin(s)", document.display(), deps.len());
        Ok(deps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::discovery::CENTRAL_MANIFEST;
    use crate::extractor::Extractor;

    #[test]
    fn test_extract_props() {
        let dir = tempfile::tempdir().unwrap();
        let props = dir.path().join(CENTRAL_MANIFEST);
        std::fs::write(
            &props,
            r#"<Project>
  <PropertyGroup>
    <ManagePackageVersionsCentrally>true</ManagePackageVersionsCentrally>
  </PropertyGroup>
  <ItemGroup>
    <PackageVersion Include="Newtonsoft.Json" Version="13.0.1" />
    <PackageVersion Include="xunit" Version="2.4.2" />
    <PackageVersion Include="NoVersion" />
    <PackageReference Include="Ignored" Version="1.0.0" />
  </ItemGroup>
</Project>"#,
        )
        .unwrap();

        let extractor = CentralExtractor::new();
        let docs = extractor.discover(dir.path()).unwrap();
        assert_eq!(docs, vec![props]);

        let deps = extractor.extract(&docs[0]).unwrap();
        assert_eq!(
            deps,
            vec![
                DependencyDeclaration::new("Newtonsoft.Json", "13.0.1"),
                DependencyDeclaration::new("xunit", "2.4.2"),
            ]
        );
    }

    #[test]
    fn test_discover_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = CentralExtractor::new().discover(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingCentralManifest(_))
        ));
    }
}
