//! pinwatch - keep a pinned Poetry dependency constraint in step with
//! the latest upstream GitHub release
//!
//! The library exposes the pieces the CLI wires together:
//! - Release lookup (GitHub releases API)
//! - Constraint parsing with caret expansion
//! - Upper-bound merging
//! - Format-preserving pyproject.toml rewriting

pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod registry;
pub mod update;
