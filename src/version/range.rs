use std::str::FromStr;

use super::{SemanticVersion, VersionError};

/// One end of an interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub version: SemanticVersion,
    pub inclusive: bool,
}

/// A set of versions written in NuGet range notation.
///
/// | Text          | Meaning             |
/// |---------------|---------------------|
/// | `1.0`         | exactly 1.0         |
/// | `[1.0]`       | exactly 1.0         |
/// | `[1.0,2.0)`   | 1.0 <= v < 2.0      |
/// | `(1.0,]`      | v > 1.0             |
/// | `(,2.0]`      | v <= 2.0            |
/// | `(,)`         | any version         |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRange {
    Exact(SemanticVersion),
    Interval {
        lower: Option<Bound>,
        upper: Option<Bound>,
    },
}

impl VersionRange {
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let invalid = |reason: &'static str| VersionError::InvalidRange {
            text: trimmed.to_string(),
            reason,
        };

        let open = trimmed.chars().next().unwrap_or_default();
        if open != '[' && open != '(' {
            if trimmed.contains(['[', ']', '(', ')', ',']) {
                return Err(invalid("unexpected bracket or comma in bare version"));
            }
            return Ok(VersionRange::Exact(SemanticVersion::parse(trimmed)?));
        }

        let close = trimmed.chars().last().unwrap_or_default();
        if trimmed.len() < 2 || (close != ']' && close != ')') {
            return Err(invalid("missing closing bracket"));
        }
        let inner = &trimmed[1..trimmed.len() - 1];
        if inner.contains(['[', ']', '(', ')']) {
            return Err(invalid("nested brackets"));
        }

        let Some((lower_text, upper_text)) = inner.split_once(',') else {
            if open != '[' || close != ']' {
                return Err(invalid("a single version must be enclosed in square brackets"));
            }
            let version = inner.trim();
            if version.is_empty() {
                return Err(invalid("no version between brackets"));
            }
            return Ok(VersionRange::Exact(SemanticVersion::parse(version)?));
        };
        if upper_text.contains(',') {
            return Err(invalid("too many commas"));
        }

        let bound = |text: &str, inclusive: bool| -> Result<Option<Bound>, VersionError> {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            Ok(Some(Bound {
                version: SemanticVersion::parse(text)?,
                inclusive,
            }))
        };
        let lower = bound(lower_text, open == '[')?;
        let upper = bound(upper_text, close == ']')?;

        if let (Some(lo), Some(hi)) = (&lower, &upper) {
            if lo.version > hi.version {
                return Err(invalid("lower bound is greater than upper bound"));
            }
            if lo.version == hi.version && !(lo.inclusive && hi.inclusive) {
                return Err(invalid("range is empty"));
            }
        }

        Ok(VersionRange::Interval { lower, upper })
    }

    /// Whether `version` falls inside this range.
    pub fn satisfies(&self, version: &SemanticVersion) -> bool {
        match self {
            VersionRange::Exact(v) => v == version,
            VersionRange::Interval { lower, upper } => {
                let above = lower.as_ref().map_or(true, |b| {
                    if b.inclusive {
                        version >= &b.version
                    } else {
                        version > &b.version
                    }
                });
                let below = upper.as_ref().map_or(true, |b| {
                    if b.inclusive {
                        version <= &b.version
                    } else {
                        version < &b.version
                    }
                });
                above && below
            }
        }
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
