//! pyproject.toml access for Poetry projects
//!
//! Handles:
//! - tool.poetry.dependencies (Poetry)
//! - tool.poetry.group.<name>.dependencies (Poetry 1.2+)
//!
//! Entries may be a plain constraint string (`pysigma = "^0.10.0"`) or an
//! inline table with a `version` key (`pysigma = { version = "^0.10.0" }`).

use crate::domain::SpecifierSet;
use crate::error::ManifestError;
use crate::parser::parse_constraint;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

// Table or array-of-tables header at column 0 made of key characters only,
// so nested array lines such as `    ["x"]` or `[1, 2],` never match
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\[\[?[ \t]*([A-Za-z0-9_\-."' \t]+?)[ \t]*\]\]?[ \t]*(?:#.*)?$"#).unwrap()
});

/// Which Poetry dependency table holds the tracked entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DependencyTable {
    /// `[tool.poetry.dependencies]`
    #[default]
    Main,
    /// `[tool.poetry.group.<name>.dependencies]`
    Group(String),
}

impl DependencyTable {
    /// Dotted TOML path of the table
    pub fn key_path(&self) -> String {
        match self {
            DependencyTable::Main => "tool.poetry.dependencies".to_string(),
            DependencyTable::Group(name) => format!("tool.poetry.group.{}.dependencies", name),
        }
    }
}

impl fmt::Display for DependencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_path())
    }
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    tool: Option<ToolTable>,
}

#[derive(Debug, Default, Deserialize)]
struct ToolTable {
    poetry: Option<PoetryTable>,
}

#[derive(Debug, Default, Deserialize)]
struct PoetryTable {
    #[serde(default)]
    dependencies: BTreeMap<String, DependencyEntry>,
    #[serde(default)]
    group: BTreeMap<String, GroupTable>,
}

#[derive(Debug, Default, Deserialize)]
struct GroupTable {
    #[serde(default)]
    dependencies: BTreeMap<String, DependencyEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DependencyEntry {
    Constraint(String),
    Detailed(DetailedEntry),
    #[allow(dead_code)]
    Other(toml::Value),
}

#[derive(Debug, Deserialize)]
struct DetailedEntry {
    version: Option<String>,
}

impl PyProject {
    fn table(&self, table: &DependencyTable) -> Option<&BTreeMap<String, DependencyEntry>> {
        let poetry = self.tool.as_ref()?.poetry.as_ref()?;
        match table {
            DependencyTable::Main => Some(&poetry.dependencies),
            DependencyTable::Group(name) => poetry.group.get(name).map(|g| &g.dependencies),
        }
    }
}

/// Normalize a package name the way Python packaging compares them
fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !last_was_separator {
                out.push('-');
            }
            last_was_separator = true;
        } else {
            out.extend(c.to_lowercase());
            last_was_separator = false;
        }
    }
    out
}

/// Where a constraint string sits inside the manifest text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintLocation {
    /// Key exactly as written in the manifest
    pub key: String,
    /// Constraint string as written
    pub raw: String,
    /// Byte range of the constraint between its quotes
    span: Range<usize>,
}

/// A loaded pyproject.toml
#[derive(Debug, Clone)]
pub struct PyprojectManifest {
    path: PathBuf,
    content: String,
    table: DependencyTable,
}

impl PyprojectManifest {
    /// Load a manifest from disk
    pub fn load(path: &Path, table: DependencyTable) -> Result<Self, ManifestError> {
        let content = super::read_manifest(path)?;
        Ok(Self::from_content(path, content, table))
    }

    /// Wrap manifest text that was read elsewhere
    pub fn from_content(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        table: DependencyTable,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            table,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn table(&self) -> &DependencyTable {
        &self.table
    }

    fn parse_document(&self, content: &str) -> Result<PyProject, ManifestError> {
        toml::from_str(content)
            .map_err(|e| ManifestError::toml_parse_error(&self.path, e.to_string()))
    }

    /// Raw constraint string of `dependency` together with its manifest key
    fn lookup(&self, content: &str, dependency: &str) -> Result<(String, String), ManifestError> {
        let document = self.parse_document(content)?;
        let missing =
            || ManifestError::missing_entry(&self.path, self.table.key_path(), dependency);

        let table = document.table(&self.table).ok_or_else(missing)?;
        let wanted = normalize_name(dependency);
        let (key, entry) = table
            .get_key_value(dependency)
            .or_else(|| table.iter().find(|(key, _)| normalize_name(key) == wanted))
            .ok_or_else(missing)?;

        let raw = match entry {
            DependencyEntry::Constraint(raw) => raw.clone(),
            DependencyEntry::Detailed(DetailedEntry { version: Some(raw) }) => raw.clone(),
            _ => {
                return Err(ManifestError::UnsupportedEntry {
                    path: self.path.clone(),
                    dependency: dependency.to_string(),
                })
            }
        };

        Ok((key.clone(), raw))
    }

    /// Constraint string of `dependency` exactly as written
    pub fn raw_constraint(&self, dependency: &str) -> Result<String, ManifestError> {
        self.lookup(&self.content, dependency).map(|(_, raw)| raw)
    }

    /// Parsed constraint of `dependency`, with caret shorthand expanded
    pub fn specifiers(&self, dependency: &str) -> Result<SpecifierSet, ManifestError> {
        let raw = self.raw_constraint(dependency)?;
        parse_constraint(&raw).map_err(|source| ManifestError::InvalidConstraint {
            path: self.path.clone(),
            dependency: dependency.to_string(),
            source,
        })
    }

    /// Byte range of the body of table `wanted`, from after its header to
    /// the next header or end of file
    fn section_span(&self, wanted: &str) -> Option<Range<usize>> {
        let mut offset = 0;
        let mut start = None;

        for line in self.content.split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();

            if let Some(caps) = HEADER_RE.captures(line.trim_end_matches(['\r', '\n'])) {
                let header: String = caps[1]
                    .chars()
                    .filter(|c| !c.is_whitespace() && !matches!(c, '"' | '\''))
                    .collect();
                if let Some(body_start) = start {
                    return Some(body_start..line_start);
                }
                if header == wanted {
                    start = Some(offset);
                }
            }
        }

        start.map(|body_start| body_start..self.content.len())
    }

    /// Locate the constraint string of `dependency` in the manifest text
    pub fn locate(&self, dependency: &str) -> Result<ConstraintLocation, ManifestError> {
        let (key, raw) = self.lookup(&self.content, dependency)?;
        let not_writable = |message: &str| {
            ManifestError::entry_not_writable(&self.path, dependency, message.to_string())
        };

        let key_pattern = format!(r#"["']?{}["']?"#, regex::escape(&key));
        // name = "constraint"
        let simple = format!(
            r#"(?m)^[ \t]*{}[ \t]*=[ \t]*["']([^"'\n]*)["']"#,
            key_pattern
        );
        // name = { version = "constraint", ... }
        let inline = format!(
            r#"(?m)^[ \t]*{}[ \t]*=[ \t]*\{{[^}}\n]*?\bversion[ \t]*=[ \t]*["']([^"'\n]*)["']"#,
            key_pattern
        );
        // [<table>.name] followed by version = "constraint"
        let sub_table = r#"(?m)^[ \t]*version[ \t]*=[ \t]*["']([^"'\n]*)["']"#.to_string();

        let table_path = self.table.key_path();
        let entry_path = format!("{}.{}", table_path, key);
        let candidates = [
            (table_path.as_str(), simple),
            (table_path.as_str(), inline),
            (entry_path.as_str(), sub_table),
        ];

        for (header, pattern) in candidates {
            let Some(section) = self.section_span(header) else {
                continue;
            };
            let body = &self.content[section.clone()];
            let re = Regex::new(&pattern).map_err(|e| not_writable(&e.to_string()))?;
            if let Some(m) = re.captures(body).and_then(|caps| caps.get(1)) {
                if m.as_str() == raw {
                    return Ok(ConstraintLocation {
                        key,
                        raw,
                        span: section.start + m.start()..section.start + m.end(),
                    });
                }
            }
        }

        Err(not_writable(
            "entry is not a single-line string, inline table or [table.name] sub-table",
        ))
    }

    /// Manifest text with the constraint of `dependency` replaced by `new`.
    ///
    /// Only the characters between the quotes change; the result is parsed
    /// again to confirm the entry now reads `new`.
    pub fn with_constraint(
        &self,
        dependency: &str,
        new: &SpecifierSet,
    ) -> Result<String, ManifestError> {
        let location = self.locate(dependency)?;
        let replacement = new.to_string();

        let mut updated = String::with_capacity(self.content.len() + replacement.len());
        updated.push_str(&self.content[..location.span.start]);
        updated.push_str(&replacement);
        updated.push_str(&self.content[location.span.end..]);

        let (_, written) = self.lookup(&updated, dependency)?;
        if written != replacement {
            return Err(ManifestError::entry_not_writable(
                &self.path,
                dependency,
                format!("rewritten entry reads '{}'", written),
            ));
        }

        Ok(updated)
    }
}
