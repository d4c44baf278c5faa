use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::config::ConfigError;

/// A dependency entry as found in a project document. The version text is
/// kept raw; it is only parsed when compared against a blocked rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    pub id: String,
    pub version: String,
}

impl DependencyDeclaration {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}

/// One blocked dependency: a declaration that satisfied a rule's range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub id: String,
    pub resolved_version: String,
    pub rule_id: String,
    pub rule_range: String,
    pub source: PathBuf,
}

/// A (declaration, rule) pair that could not be compared because either the
/// declared version or the rule's range failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub id: String,
    pub version_text: String,
    pub rule_range: String,
    pub source: PathBuf,
    pub reason: String,
}

/// Which documents to read dependencies from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// `<PackageReference>` entries in every `*.csproj` under the project dir.
    Direct,
    /// `<PackageVersion>` pins in the root `Directory.Packages.props`.
    Central,
}

impl FromStr for ScanMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "direct" => Ok(ScanMode::Direct),
            "central" => Ok(ScanMode::Central),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanMode::Direct => write!(f, "direct"),
            ScanMode::Central => write!(f, "central"),
        }
    }
}

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOutcome {
    /// The rule set was empty; nothing was scanned.
    NoRulesLoaded,
    Clean,
    Blocked,
    /// A document could not be read; the scan stopped before finding a match.
    Incomplete,
}

impl std::fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanOutcome::NoRulesLoaded => write!(f, "no rules"),
            ScanOutcome::Clean => write!(f, "clean"),
            ScanOutcome::Blocked => write!(f, "blocked"),
            ScanOutcome::Incomplete => write!(f, "incomplete"),
        }
    }
}
