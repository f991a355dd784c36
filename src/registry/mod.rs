//! Release sources for fetching the latest upstream version
//!
//! This module provides:
//! - HTTP client shared foundation
//! - GitHub releases adapter

mod client;
mod github;

pub use client::HttpClient;
pub use github::{GitHubReleases, GITHUB_API_URL};

use crate::domain::Release;
use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for sources of upstream releases
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Get the source name used in messages
    fn source_name(&self) -> &'static str;

    /// Fetch the most recent published release of `project`
    async fn latest_release(&self, project: &str) -> Result<Release, RegistryError>;
}
