use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::VersionError;

// MAJOR[.MINOR[.PATCH[.REVISION]]][-pre.release][+build.meta]
const VERSION_PATTERN: &str = r"^([0-9]+)(?:\.([0-9]+))?(?:\.([0-9]+))?(?:\.([0-9]+))?(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern compiles"))
}

/// One dot-separated element of a pre-release label.
///
/// `Numeric` keeps its ASCII digits with leading zeros stripped, so
/// identifiers wider than `u64` still order by value.
#[derive(Debug, Clone)]
pub enum PreReleaseIdentifier {
    Numeric(String),
    AlphaNumeric(String),
}

impl PreReleaseIdentifier {
    fn parse(s: &str) -> Self {
        if s.bytes().all(|b| b.is_ascii_digit()) {
            let digits = s.trim_start_matches('0');
            let digits = if digits.is_empty() { "0" } else { digits };
            return PreReleaseIdentifier::Numeric(digits.to_string());
        }
        PreReleaseIdentifier::AlphaNumeric(s.to_string())
    }
}

impl Ord for PreReleaseIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        use PreReleaseIdentifier::*;
        match (self, other) {
            // Normalized digits: more digits means a larger value.
            (Numeric(a), Numeric(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Numeric(_), AlphaNumeric(_)) => Ordering::Less,
            (AlphaNumeric(_), Numeric(_)) => Ordering::Greater,
            // NuGet labels are case-insensitive
            (AlphaNumeric(a), AlphaNumeric(b)) => a
                .to_ascii_lowercase()
                .cmp(&b.to_ascii_lowercase()),
        }
    }
}

impl PartialOrd for PreReleaseIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PreReleaseIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PreReleaseIdentifier {}

impl fmt::Display for PreReleaseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreReleaseIdentifier::Numeric(n) => write!(f, "{}", n),
            PreReleaseIdentifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// A parsed package version.
///
/// Equality and ordering ignore `build_metadata`. A version with a
/// pre-release label sorts before the same numbers without one.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Legacy fourth segment (`1.2.3.4`); zero when absent.
    pub revision: u64,
    pub pre_release: Vec<PreReleaseIdentifier>,
    pub build_metadata: Option<String>,
}

impl SemanticVersion {
    /// Parse a version string such as `13.0.1`, `1.0`, `2.0.0-beta.2+sha.1a2b`.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(VersionError::Empty);
        }

        let caps = version_regex()
            .captures(text)
            .ok_or_else(|| VersionError::InvalidVersion(text.to_string()))?;

        let segment = |i: usize| -> Result<u64, VersionError> {
            match caps.get(i) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| VersionError::NumberOutOfRange(text.to_string())),
                None => Ok(0),
            }
        };

        let pre_release: Vec<PreReleaseIdentifier> = caps
            .get(5)
            .map(|m| m.as_str().split('.').map(PreReleaseIdentifier::parse).collect())
            .unwrap_or_default();

        Ok(Self {
            major: segment(1)?,
            minor: segment(2)?,
            patch: segment(3)?,
            revision: segment(4)?,
            pre_release,
            build_metadata: caps.get(6).map(|m| m.as_str().to_string()),
        })
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre_release.is_empty()
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch, self.revision)
            .cmp(&(other.major, other.minor, other.patch, other.revision))
            .then_with(|| match (self.is_prerelease(), other.is_prerelease()) {
                (false, false) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                // Slice ordering is element-wise, and a strict prefix is less.
                (true, true) => self.pre_release.as_slice().cmp(other.pre_release.as_slice()),
            })
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

/// Normalized form; build metadata is not printed.
impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.revision != 0 {
            write!(f, ".{}", self.revision)?;
        }
        for (i, id) in self.pre_release.iter().enumerate() {
            let sep = if i == 0 { '-' } else { '.' };
            write!(f, "{}{}", sep, id)?;
        }
        Ok(())
    }
}
