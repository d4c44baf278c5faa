//! Turn project documents into raw `(id, version)` declarations.
//!
//! - [`direct`]: `<PackageReference>` entries of every `*.csproj`.
//! - [`central`]: `<PackageVersion>` pins of `Directory.Packages.props`.
//!
//! Extractors never parse version text; that is left to [`crate::policy`] so a
//! bad version in one entry cannot stop the rest of a document from being read.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::models::{DependencyDeclaration, ScanMode};

pub mod central;
pub mod direct;
mod xml;

pub trait Extractor {
    /// Documents this extractor reads under `root`, in scan order.
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>>;

    fn extract(&self, document: &Path) -> Result<Vec<DependencyDeclaration>>;
}

/// The extractor that implements `mode`.
pub fn for_mode(mode: ScanMode) -> Box<dyn Extractor> {
    match mode {
        ScanMode::Direct => Box::new(direct::DirectExtractor::new()),
        ScanMode::Central => Box::new(central::CentralExtractor::new()),
    }
}
