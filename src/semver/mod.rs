// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Semantic version parsing and increment arithmetic.
//!
//! Versions are plain `major.minor.patch` triples. An optional leading `v`
//! is accepted on parse and never produced on format. Pre-release and build
//! metadata are not supported.

use crate::error::{QvError, Result, VersionError};
use std::fmt;
use std::str::FromStr;

/// An immutable `major.minor.patch` version value.
///
/// Ordering is component-wise: major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    /// Create a version from its three components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string, with or without a leading `v`.
    ///
    /// Exactly three dot-separated non-negative integer components are
    /// required; anything else fails with the offending component named.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.strip_prefix('v').unwrap_or(input);
        let parts: Vec<&str> = trimmed.split('.').collect();

        if parts.len() != 3 {
            return Err(QvError::Version(VersionError::InvalidFormat {
                input: trimmed.to_string(),
            }));
        }

        let component = |name: &str, value: &str| -> Result<u64> {
            value
                .parse::<u64>()
                .map_err(|_| {
                    QvError::Version(VersionError::InvalidComponent {
                        component: name.to_string(),
                        value: value.to_string(),
                    })
                })
        };

        Ok(Self {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            patch: component("patch", parts[2])?,
        })
    }
}

impl FromStr for SemanticVersion {
    type Err = QvError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which semver component a plan advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncrementKind {
    Major,
    #[default]
    Minor,
    Patch,
}

impl IncrementKind {
    /// The ledger/plan text form of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            IncrementKind::Major => "major",
            IncrementKind::Minor => "minor",
            IncrementKind::Patch => "patch",
        }
    }
}

impl fmt::Display for IncrementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Increment the major version and reset minor and patch.
///
/// Unparseable input substitutes the `1.0.0` bootstrap instead of failing.
/// Note this can mask a corrupted ledger row; callers relying on strict
/// validation should parse first.
pub fn increment_major(version: &str) -> String {
    match SemanticVersion::parse(version) {
        Ok(v) => SemanticVersion::new(v.major + 1, 0, 0).to_string(),
        Err(_) => "1.0.0".to_string(),
    }
}

/// Increment the minor version and reset patch.
///
/// Unparseable input substitutes the `0.1.0` bootstrap instead of failing.
pub fn increment_minor(version: &str) -> String {
    match SemanticVersion::parse(version) {
        Ok(v) => SemanticVersion::new(v.major, v.minor + 1, 0).to_string(),
        Err(_) => "0.1.0".to_string(),
    }
}

/// Increment the patch version.
///
/// Unparseable input substitutes the `0.0.1` bootstrap instead of failing.
pub fn increment_patch(version: &str) -> String {
    match SemanticVersion::parse(version) {
        Ok(v) => SemanticVersion::new(v.major, v.minor, v.patch + 1).to_string(),
        Err(_) => "0.0.1".to_string(),
    }
}

/// The starting version for a repository with no recorded history.
pub fn initial(kind: IncrementKind) -> &'static str {
    match kind {
        IncrementKind::Major => "1.0.0",
        IncrementKind::Patch => "0.0.1",
        IncrementKind::Minor => "0.1.0",
    }
}

/// Apply an increment of the given kind to a version string.
pub fn increment(version: &str, kind: IncrementKind) -> String {
    match kind {
        IncrementKind::Major => increment_major(version),
        IncrementKind::Minor => increment_minor(version),
        IncrementKind::Patch => increment_patch(version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let v = SemanticVersion::parse("1.2.3").unwrap();
        assert_eq!(v, SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_parse_strips_v_prefix() {
        let v = SemanticVersion::parse("v10.0.7").unwrap();
        assert_eq!(v, SemanticVersion::new(10, 0, 7));
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!(SemanticVersion::parse("1.2").is_err());
        assert!(SemanticVersion::parse("1.2.3.4").is_err());
        assert!(SemanticVersion::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric_and_names_component() {
        let err = SemanticVersion::parse("1.x.3").unwrap_err();
        assert!(err.to_string().contains("minor"));

        let err = SemanticVersion::parse("1.2.-3").unwrap_err();
        assert!(err.to_string().contains("patch"));
    }

    #[test]
    fn test_round_trip() {
        for (major, minor, patch) in [(0, 0, 0), (1, 2, 3), (12, 0, 99), (100, 200, 300)] {
            let text = SemanticVersion::new(major, minor, patch).to_string();
            let parsed = SemanticVersion::parse(&text).unwrap();
            assert_eq!(parsed, SemanticVersion::new(major, minor, patch));
        }
    }

    #[test]
    fn test_ordering_is_numeric() {
        let v1_9 = SemanticVersion::parse("1.9.0").unwrap();
        let v1_10 = SemanticVersion::parse("1.10.0").unwrap();
        let v2 = SemanticVersion::parse("2.0.0").unwrap();
        assert!(v1_10 > v1_9);
        assert!(v2 > v1_10);
    }

    #[test]
    fn test_increment_resets_lower_components() {
        assert_eq!(increment_major("1.2.3"), "2.0.0");
        assert_eq!(increment_minor("1.2.3"), "1.3.0");
        assert_eq!(increment_patch("1.2.3"), "1.2.4");
    }

    #[test]
    fn test_increment_monotonicity() {
        let base = SemanticVersion::parse("1.2.3").unwrap();
        let major = SemanticVersion::parse(&increment_major("1.2.3")).unwrap();
        let minor = SemanticVersion::parse(&increment_minor("1.2.3")).unwrap();
        let patch = SemanticVersion::parse(&increment_patch("1.2.3")).unwrap();
        assert!(major > minor);
        assert!(minor > patch);
        assert!(patch > base);
    }

    #[test]
    fn test_increment_fallback_on_garbage() {
        assert_eq!(increment_major("not-a-version"), "1.0.0");
        assert_eq!(increment_minor("not-a-version"), "0.1.0");
        assert_eq!(increment_patch("not-a-version"), "0.0.1");
    }

    #[test]
    fn test_initial_bootstrap_table() {
        assert_eq!(initial(IncrementKind::Major), "1.0.0");
        assert_eq!(initial(IncrementKind::Minor), "0.1.0");
        assert_eq!(initial(IncrementKind::Patch), "0.0.1");
    }

    #[test]
    fn test_increment_kind_text_form() {
        assert_eq!(IncrementKind::Major.as_str(), "major");
        assert_eq!(IncrementKind::Minor.to_string(), "minor");
        assert_eq!(IncrementKind::default(), IncrementKind::Minor);
    }
}
