//! NuGet-style version parsing, ordering and range matching.
//!
//! - [`semver`]: [`SemanticVersion`] parsing and its total order
//!   (pre-releases sort before the release, build metadata is ignored).
//! - [`range`]: [`VersionRange`] parsing for bare versions and bracketed
//!   intervals, plus [`VersionRange::satisfies`].

pub mod range;
pub mod semver;

pub use range::VersionRange;
pub use semver::SemanticVersion;

use thiserror::Error;

/// Failure to parse a version or range string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,

    #[error("'{0}' is not a valid version")]
    InvalidVersion(String),

    #[error("numeric segment too large in '{0}'")]
    NumberOutOfRange(String),

    #[error("'{text}' is not a valid version range: {reason}")]
    InvalidRange { text: String, reason: &'static str },
}
