//! Manifest file access
//!
//! This module provides functionality to:
//! - Read the tracked dependency's constraint from pyproject.toml
//! - Rewrite that constraint without disturbing the rest of the document

mod pyproject_toml;
mod writer;

pub use pyproject_toml::{ConstraintLocation, DependencyTable, PyprojectManifest};
pub use writer::{read_manifest, write_manifest, ManifestWriter, WriteResult};
