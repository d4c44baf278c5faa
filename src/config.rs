use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Problems that stop a run before any project document is scanned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown scan mode '{0}' (expected 'direct' or 'central')")]
    UnknownMode(String),

    #[error("central package manifest not found: {0}")]
    MissingCentralManifest(PathBuf),

    #[error("project directory not found: {0}")]
    ProjectDirNotFound(PathBuf),

    #[error("failed to read blocked packages file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid blocked packages file {path}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Root of the blocked packages file, deserialized from `blocked-packages.yaml`.
#[derive(Debug, Deserialize)]
struct BlockedPackagesFile {
    #[serde(default)]
    packages: Option<Vec<BlockedPackageEntry>>,
}

/// A raw entry; both fields are optional until validated.
#[derive(Debug, Deserialize)]
struct BlockedPackageEntry {
    id: Option<String>,
    version: Option<String>,
}

/// A package identifier and the version range that is not allowed for it.
///
/// The range is kept as written and only parsed when a declaration with a
/// matching identifier is evaluated against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedRule {
    pub id: String,
    pub range: String,
}

impl BlockedRule {
    pub fn new(id: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            range: range.into(),
        }
    }

    /// Package identifiers are compared ignoring case.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.to_lowercase() == id.to_lowercase()
    }
}

/// Ordered list of blocked rules, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedRuleSet {
    rules: Vec<BlockedRule>,
}

impl BlockedRuleSet {
    pub fn new(rules: Vec<BlockedRule>) -> Self {
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockedRule> {
        self.rules.iter()
    }
}

/// Load the blocked rule set from `path`.
///
/// A missing file is not an error: it yields an empty rule set. Entries
/// without an `id` or `version` are dropped with a warning.
pub fn load_blocked_rules(path: &Path) -> Result<BlockedRuleSet, ConfigError> {
    if !path.exists() {
        log::debug!("no blocked packages file at {}", path.display());
        return Ok(BlockedRuleSet::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_blocked_rules(&content).map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_blocked_rules(content: &str) -> Result<BlockedRuleSet, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(BlockedRuleSet::default());
    }

    let file: Option<BlockedPackagesFile> = serde_yaml::from_str(content)?;
    let entries = file.and_then(|f| f.packages).unwrap_or_default();

    let mut rules = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let id = entry.id.as_deref().map(str::trim).unwrap_or_default();
        let range = entry.version.as_deref().map(str::trim).unwrap_or_default();
        if id.is_empty() || range.is_empty() {
            log::warn!(
                "skipping blocked package entry #{}: both 'id' and 'version' are required",
                index + 1
            );
            continue;
        }
        rules.push(BlockedRule::new(id, range));
    }

    Ok(BlockedRuleSet::new(rules))
}
