//! GitHub releases adapter
//!
//! Fetches the latest published release of a repository.
//! API endpoint: https://api.github.com/repos/{owner}/{repo}/releases/latest

use crate::domain::{Release, Version};
use crate::error::RegistryError;
use crate::registry::{HttpClient, ReleaseSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// GitHub REST API base URL
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Media type recommended by the GitHub REST API
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// GitHub releases adapter
pub struct GitHubReleases {
    client: HttpClient,
    base_url: String,
}

/// Latest release response (only the fields we use)
#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    tag_name: String,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    html_url: Option<String>,
}

impl GitHubReleases {
    /// Create an adapter talking to the API root `base_url`
    /// ([`GITHUB_API_URL`], GitHub Enterprise, test servers)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for a repository's latest release
    fn build_url(&self, project: &str) -> String {
        format!("{}/repos/{}/releases/latest", self.base_url, project)
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleases {
    fn source_name(&self) -> &'static str {
        "GitHub"
    }

    async fn latest_release(&self, project: &str) -> Result<Release, RegistryError> {
        let url = self.build_url(project);
        debug!(%url, "fetching latest release");

        let response: ReleaseResponse = self
            .client
            .get_json(&url, Some(GITHUB_ACCEPT), project, self.source_name())
            .await?;

        let version =
            Version::from_tag(&response.tag_name).map_err(|source| RegistryError::InvalidTag {
                project: project.to_string(),
                tag: response.tag_name.clone(),
                source,
            })?;

        let mut release = Release::new(response.tag_name, version);
        if let Some(published_at) = response.published_at {
            release = release.with_published_at(published_at);
        }
        if let Some(url) = response.html_url {
            release = release.with_url(url);
        }

        Ok(release)
    }
}
