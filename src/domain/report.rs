//! Outcome of a single constraint check

use super::{Release, SpecifierSet};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The latest release already satisfies the constraint
    UpToDate,
    /// The manifest was rewritten
    Updated,
    /// The manifest needs rewriting but dry-run suppressed it
    WouldUpdate,
}

impl RunStatus {
    /// Returns true if the constraint had to change
    pub fn needs_update(&self) -> bool {
        !matches!(self, RunStatus::UpToDate)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::UpToDate => write!(f, "up to date"),
            RunStatus::Updated => write!(f, "updated"),
            RunStatus::WouldUpdate => write!(f, "would update"),
        }
    }
}

/// Everything a run learned and did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Final state
    pub status: RunStatus,
    /// Tracked dependency name
    pub dependency: String,
    /// Manifest that was checked
    pub manifest: PathBuf,
    /// Latest upstream release
    pub release: Release,
    /// Constraint found in the manifest (caret already expanded)
    pub current: SpecifierSet,
    /// Constraint that was (or would be) written
    pub updated: Option<SpecifierSet>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl RunReport {
    /// Display name of the manifest file
    pub fn manifest_name(&self) -> String {
        self.manifest
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.manifest.display().to_string())
    }
}
