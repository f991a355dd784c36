//! Update judgment logic for the tracked constraint
//!
//! This module provides:
//! - Specifier merging that raises the upper bound to the latest release
//! - Update judgment that decides whether the manifest has to change

mod merge;

pub use merge::merge_specifiers;

use crate::domain::{SpecifierSet, Version};
use crate::error::SpecError;

/// Decision for the tracked constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    /// The current constraint already admits the latest version
    UpToDate,
    /// The constraint must be replaced by `merged`
    Required {
        /// Constraint that admits the latest version
        merged: SpecifierSet,
    },
}

/// Judge whether `current` has to be rewritten to admit `latest`.
///
/// Fails with [`SpecError::ExcludesLatest`] when raising the upper bound is
/// not enough, e.g. `!=latest` or a lower bound above it.
pub fn judge(current: &SpecifierSet, latest: &Version) -> Result<UpdateDecision, SpecError> {
    if current.contains(latest) {
        return Ok(UpdateDecision::UpToDate);
    }

    let merged = merge_specifiers(current, latest);
    if !merged.contains(latest) {
        return Err(SpecError::ExcludesLatest {
            constraint: merged.to_string(),
            version: latest.to_string(),
        });
    }

    Ok(UpdateDecision::Required { merged })
}
