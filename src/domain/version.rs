//! Dotted numeric release versions
//!
//! Versions compare release segment by release segment, padding the
//! shorter one with zeros, so `1.0` and `1.0.0` are the same version.

use crate::error::SpecError;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A release version such as `0.10.7`
#[derive(Debug, Clone)]
pub struct Version {
    release: Vec<u64>,
}

impl Version {
    /// Creates a version from its release segments
    pub fn new(release: impl Into<Vec<u64>>) -> Result<Self, SpecError> {
        let release = release.into();
        if release.is_empty() {
            return Err(SpecError::invalid_version("", "empty version"));
        }
        Ok(Self { release })
    }

    /// Parses a version from a release tag, stripping one leading `v`
    pub fn from_tag(tag: &str) -> Result<Self, SpecError> {
        let tag = tag.trim();
        tag.strip_prefix('v').unwrap_or(tag).parse()
    }

    /// The release segments as written
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// Major component
    pub fn major(&self) -> u64 {
        self.segment(0)
    }

    /// Minor component (zero when absent)
    pub fn minor(&self) -> u64 {
        self.segment(1)
    }

    /// Patch component (zero when absent)
    pub fn patch(&self) -> u64 {
        self.segment(2)
    }

    fn segment(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }

    /// Release segments with trailing zeros removed
    fn normalized(&self) -> &[u64] {
        let end = self
            .release
            .iter()
            .rposition(|&part| part != 0)
            .map_or(0, |idx| idx + 1);
        &self.release[..end]
    }
}

impl FromStr for Version {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SpecError::invalid_version(s, "empty version"));
        }

        let release = trimmed
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(SpecError::invalid_version(
                        trimmed,
                        format!("'{}' is not a numeric component", part),
                    ));
                }
                part.parse::<u64>()
                    .map_err(|e| SpecError::invalid_version(trimmed, e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { release })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.release.iter();
        if let Some(first) = parts.next() {
            write!(f, "{}", first)?;
        }
        for part in parts {
            write!(f, ".{}", part)?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
