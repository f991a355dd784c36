//! Core domain models for pinwatch
//!
//! This module contains the fundamental types used throughout the application:
//! - Release versions and their ordering
//! - Specifiers and specifier sets for version constraints
//! - Upstream release information
//! - Run outcome reports

mod release;
mod report;
mod specifier;
mod version;

pub use release::Release;
pub use report::{RunReport, RunStatus};
pub use specifier::{Operator, Specifier, SpecifierSet};
pub use version::Version;
