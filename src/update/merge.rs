//! Specifier merging
//!
//! Raises the upper bound of a specifier set to a newly released version
//! while leaving every other constraint as the project wrote it.

use crate::domain::{Operator, Specifier, SpecifierSet, Version};

/// Replaces every upper bound of `current` with a single `<=latest`.
///
/// `<` and `<=` specifiers are dropped; `>=`, `>`, `==` and `!=` are kept in
/// their original order. A strict `<` is also turned into `<=latest`.
pub fn merge_specifiers(current: &SpecifierSet, latest: &Version) -> SpecifierSet {
    let mut merged: SpecifierSet = current
        .iter()
        .filter(|spec| !spec.operator().is_upper_bound())
        .cloned()
        .collect();

    merged.push(Specifier::new(Operator::LessOrEqual, latest.clone()));
    merged
}
