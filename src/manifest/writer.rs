//! Manifest file writing
//!
//! This module provides:
//! - ManifestWriter for applying a new constraint to the manifest file
//! - Dry-run mode support (no actual file modifications)
//! - Format preservation when updating the constraint

use crate::domain::SpecifierSet;
use crate::error::ManifestError;
use crate::manifest::PyprojectManifest;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writer for manifest files that applies constraint updates
pub struct ManifestWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

/// Result of applying a constraint to a manifest file
#[derive(Debug)]
pub struct WriteResult {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Constraint string before the update, as written
    pub old_constraint: String,
    /// Constraint string after the update
    pub new_constraint: String,
    /// Whether the file was actually modified
    pub file_modified: bool,
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Check if this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Replace the constraint of `dependency` and persist the document
    pub fn apply(
        &self,
        manifest: &PyprojectManifest,
        dependency: &str,
        new: &SpecifierSet,
    ) -> Result<WriteResult, ManifestError> {
        let old_constraint = manifest.raw_constraint(dependency)?;
        let updated = manifest.with_constraint(dependency, new)?;

        let mut result = WriteResult {
            path: manifest.path().to_path_buf(),
            old_constraint,
            new_constraint: new.to_string(),
            file_modified: false,
        };

        if self.dry_run {
            debug!(path = %result.path.display(), "dry-run: manifest left untouched");
            return Ok(result);
        }

        if updated != manifest.content() {
            write_manifest(manifest.path(), &updated)?;
            result.file_modified = true;
            info!(
                path = %result.path.display(),
                from = %result.old_constraint,
                to = %result.new_constraint,
                "manifest updated"
            );
        }

        Ok(result)
    }
}

/// Read a manifest file content safely
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ManifestError::not_found(path),
        _ => ManifestError::read_error(path, e),
    })
}

/// Write content to a manifest file
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::write_error(path, e))
}
