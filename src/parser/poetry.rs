//! Poetry version constraint parser
//!
//! Handles constraint formats:
//! - Caret: `^1.2.3` (expanded to an explicit range)
//! - Comparison: `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`, `==1.2.3`, `!=1.2.3`
//! - Range: `>=1.0, <2.0`, any mix of the above joined by commas

use crate::domain::{Operator, Specifier, SpecifierSet, Version};
use crate::error::SpecError;
use regex::Regex;
use std::sync::LazyLock;

static CARET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\^\s*(\d+(?:\.\d+)*)$").unwrap());

/// Expands a caret token into its lower and upper bound.
///
/// The upper bound bumps the left-most non-zero of major, minor and patch:
/// `^1.2.3` → `<2.0.0`, `^0.10.0` → `<0.11.0`, `^0.0.3` → `<0.0.4`.
pub fn expand_caret(token: &str) -> Result<(Specifier, Specifier), SpecError> {
    let trimmed = token.trim();
    let caps = CARET_RE.captures(trimmed).ok_or_else(|| {
        SpecError::invalid_caret(trimmed, "expected '^' followed by a numeric version")
    })?;

    let lower = caps[1]
        .parse::<Version>()
        .map_err(|e| SpecError::invalid_caret(trimmed, e.to_string()))?;

    if lower.release().len() < 3 {
        return Err(SpecError::invalid_caret(
            trimmed,
            "expected at least major.minor.patch",
        ));
    }

    let (major, minor, patch) = (lower.major(), lower.minor(), lower.patch());
    let upper_release = if major > 0 {
        vec![major + 1, 0, 0]
    } else if minor > 0 {
        vec![0, minor + 1, 0]
    } else {
        vec![0, 0, patch + 1]
    };
    let upper = Version::new(upper_release)?;

    Ok((
        Specifier::new(Operator::GreaterOrEqual, lower),
        Specifier::new(Operator::Less, upper),
    ))
}

/// Rewrites caret shorthand into explicit specifiers; any other token is
/// returned trimmed and otherwise unchanged.
pub fn preprocess_specifier(token: &str) -> Result<String, SpecError> {
    let trimmed = token.trim();
    if !trimmed.starts_with('^') {
        return Ok(trimmed.to_string());
    }

    let (lower, upper) = expand_caret(trimmed)?;
    Ok(format!("{}, {}", lower, upper))
}

/// Parses a full constraint string from the manifest into a specifier set.
///
/// Each comma-separated token is preprocessed on its own, so caret shorthand
/// may appear alongside explicit specifiers (`^0.10.0, !=0.10.5`).
pub fn parse_constraint(raw: &str) -> Result<SpecifierSet, SpecError> {
    if raw.trim().is_empty() {
        return Err(SpecError::EmptyConstraint);
    }

    let expanded = raw
        .split(',')
        .map(|token| {
            if token.trim().is_empty() {
                Err(SpecError::invalid_specifier(raw.trim(), "empty specifier"))
            } else {
                preprocess_specifier(token)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    expanded.join(", ").parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(s: &str) -> SpecifierSet {
        s.parse().unwrap()
    }

    #[test]
    fn test_preprocess_caret_zero_major() {
        assert_eq!(preprocess_specifier("^0.10.0").unwrap(), ">=0.10.0, <0.11.0");
    }

    #[test]
    fn test_preprocess_caret_nonzero_major() {
        assert_eq!(preprocess_specifier("^1.2.3").unwrap(), ">=1.2.3, <2.0.0");
    }

    #[test]
    fn test_preprocess_caret_zero_minor() {
        assert_eq!(preprocess_specifier("^0.0.3").unwrap(), ">=0.0.3, <0.0.4");
    }

    #[test]
    fn test_preprocess_caret_four_components() {
        assert_eq!(preprocess_specifier("^2.1.0.4").unwrap(), ">=2.1.0.4, <3.0.0");
    }

    #[test]
    fn test_preprocess_passes_other_tokens_through() {
        assert_eq!(preprocess_specifier(" >=0.9.1").unwrap(), ">=0.9.1");
        assert_eq!(preprocess_specifier("<= 0.10.6 ").unwrap(), "<= 0.10.6");
        assert_eq!(preprocess_specifier("!=0.10.5").unwrap(), "!=0.10.5");
    }

    #[test]
    fn test_preprocess_caret_requires_three_components() {
        let err = preprocess_specifier("^0.10").unwrap_err();
        assert!(matches!(err, SpecError::InvalidCaret { .. }));
        assert!(preprocess_specifier("^1").is_err());
    }

    #[test]
    fn test_preprocess_caret_rejects_non_numeric() {
        assert!(preprocess_specifier("^1.2.x").is_err());
        assert!(preprocess_specifier("^").is_err());
        assert!(preprocess_specifier("^v1.2.3").is_err());
    }

    #[test]
    fn test_parse_constraint_range() {
        let parsed = parse_constraint(">=0.9.1, <=0.10.6").unwrap();
        assert_eq!(parsed, set(">=0.9.1, <=0.10.6"));
    }

    #[test]
    fn test_parse_constraint_caret() {
        let parsed = parse_constraint("^0.10.0").unwrap();
        assert_eq!(parsed, set(">=0.10.0, <0.11.0"));
        assert_eq!(parsed.to_string(), ">=0.10.0, <0.11.0");
    }

    #[test]
    fn test_parse_constraint_caret_mixed_with_explicit() {
        let parsed = parse_constraint("^0.10.0, !=0.10.5").unwrap();
        assert_eq!(parsed, set(">=0.10.0, <0.11.0, !=0.10.5"));
    }

    #[test]
    fn test_parse_constraint_single() {
        assert_eq!(parse_constraint(">=0.9.0").unwrap(), set(">=0.9.0"));
        assert_eq!(parse_constraint("==0.10.7").unwrap(), set("==0.10.7"));
    }

    #[test]
    fn test_parse_constraint_errors() {
        assert_eq!(parse_constraint("").unwrap_err(), SpecError::EmptyConstraint);
        assert!(parse_constraint(">=0.9.0,").is_err());
        assert!(parse_constraint("0.10.7").is_err());
        assert!(parse_constraint("~0.10.7").is_err());
        assert!(parse_constraint("*").is_err());
    }
}
