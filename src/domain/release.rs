//! Latest upstream release information

use crate::domain::Version;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A published upstream release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    /// The tag exactly as published (e.g., "v0.10.7")
    pub tag: String,
    /// The version parsed from the tag
    pub version: Version,
    /// When the release was published, if reported
    pub published_at: Option<DateTime<Utc>>,
    /// Web page of the release, if reported
    pub url: Option<String>,
}

impl Release {
    /// Create a release with no publication metadata
    pub fn new(tag: impl Into<String>, version: Version) -> Self {
        Self {
            tag: tag.into(),
            version,
            published_at: None,
            url: None,
        }
    }

    /// Sets the publication time
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Sets the release page URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_release_builder() {
        let published = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let release = Release::new("v0.10.7", "0.10.7".parse().unwrap())
            .with_published_at(published)
            .with_url("https://github.com/SigmaHQ/pySigma/releases/tag/v0.10.7");

        assert_eq!(release.tag, "v0.10.7");
        assert_eq!(release.version.to_string(), "0.10.7");
        assert_eq!(release.published_at, Some(published));
        assert!(release.url.unwrap().ends_with("v0.10.7"));
    }

    #[test]
    fn test_release_serializes_version_as_string() {
        let release = Release::new("v1.2.3", "1.2.3".parse().unwrap());
        let json = serde_json::to_value(&release).unwrap();
        assert_eq!(json["version"], "1.2.3");
        assert!(json["published_at"].is_null());
    }
}
