//! Version specifiers and specifier sets
//!
//! Handles comparison constraints like:
//! - `>=0.9.1`, `>0.9`
//! - `<=0.10.6`, `<0.11.0`
//! - `==0.10.7`, `!=0.10.5`
//!
//! A [`SpecifierSet`] is the conjunction of its specifiers, e.g.
//! `>=0.9.1, <=0.10.6`.

use crate::domain::Version;
use crate::error::SpecError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>=`
    GreaterOrEqual,
    /// `>`
    Greater,
}

impl Operator {
    /// The operator as written in a constraint
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::GreaterOrEqual => ">=",
            Operator::Greater => ">",
        }
    }

    /// Returns true for `<` and `<=`
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, Operator::Less | Operator::LessOrEqual)
    }

    /// Splits a leading operator off a specifier token.
    /// Two-character operators are tried first so `<=` never reads as `<`.
    fn split_prefix(token: &str) -> Option<(Self, &str)> {
        const OPERATORS: [(&str, Operator); 6] = [
            ("<=", Operator::LessOrEqual),
            (">=", Operator::GreaterOrEqual),
            ("==", Operator::Equal),
            ("!=", Operator::NotEqual),
            ("<", Operator::Less),
            (">", Operator::Greater),
        ];

        OPERATORS
            .iter()
            .find_map(|(text, op)| token.strip_prefix(text).map(|rest| (*op, rest)))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operator + version constraint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Specifier {
    operator: Operator,
    version: Version,
}

impl Specifier {
    /// Creates a new specifier
    pub fn new(operator: Operator, version: Version) -> Self {
        Self { operator, version }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Returns true if `version` satisfies this specifier
    pub fn contains(&self, version: &Version) -> bool {
        match self.operator {
            Operator::Less => version < &self.version,
            Operator::LessOrEqual => version <= &self.version,
            Operator::Equal => version == &self.version,
            Operator::NotEqual => version != &self.version,
            Operator::GreaterOrEqual => version >= &self.version,
            Operator::Greater => version > &self.version,
        }
    }
}

impl FromStr for Specifier {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(SpecError::invalid_specifier(s, "empty specifier"));
        }

        let (operator, rest) = Operator::split_prefix(token).ok_or_else(|| {
            SpecError::invalid_specifier(token, "expected one of <, <=, ==, !=, >=, >")
        })?;

        let version = rest
            .trim()
            .parse::<Version>()
            .map_err(|e| SpecError::invalid_specifier(token, e.to_string()))?;

        Ok(Self::new(operator, version))
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// A conjunction of specifiers
///
/// Insertion order is kept for display; equality ignores it.
#[derive(Debug, Clone, Default)]
pub struct SpecifierSet {
    specifiers: Vec<Specifier>,
}

impl SpecifierSet {
    /// Creates an empty set, which contains every version
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a specifier unless an identical one is already present
    pub fn push(&mut self, specifier: Specifier) {
        if !self.specifiers.contains(&specifier) {
            self.specifiers.push(specifier);
        }
    }

    /// Returns true if `version` satisfies every specifier
    pub fn contains(&self, version: &Version) -> bool {
        self.specifiers.iter().all(|spec| spec.contains(version))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Specifier> {
        self.specifiers.iter()
    }

    pub fn len(&self) -> usize {
        self.specifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    /// Number of `<` / `<=` specifiers
    pub fn upper_bound_count(&self) -> usize {
        self.specifiers
            .iter()
            .filter(|spec| spec.operator().is_upper_bound())
            .count()
    }
}

impl FromIterator<Specifier> for SpecifierSet {
    fn from_iter<I: IntoIterator<Item = Specifier>>(iter: I) -> Self {
        let mut set = SpecifierSet::new();
        for specifier in iter {
            set.push(specifier);
        }
        set
    }
}

impl<'a> IntoIterator for &'a SpecifierSet {
    type Item = &'a Specifier;
    type IntoIter = std::slice::Iter<'a, Specifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.specifiers.iter()
    }
}

impl PartialEq for SpecifierSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|spec| other.specifiers.contains(spec))
    }
}

impl Eq for SpecifierSet {}

/// Parses explicit comma-separated specifiers; caret shorthand is
/// handled by [`crate::parser::parse_constraint`].
impl FromStr for SpecifierSet {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(SpecError::EmptyConstraint);
        }
        s.split(',').map(str::parse::<Specifier>).collect()
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, spec) in self.specifiers.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", spec)?;
        }
        Ok(())
    }
}

impl Serialize for SpecifierSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
