//! Update orchestrator for coordinating the check-and-rewrite workflow
//!
//! This module provides:
//! - Workflow coordination: fetch → read → judge → write
//! - Dry-run mode support
//! - Injection of the release source for testing

use crate::cli::{CliArgs, RunConfig};
use crate::domain::{RunReport, RunStatus};
use crate::error::AppError;
use crate::manifest::{ManifestWriter, PyprojectManifest};
use crate::registry::{GitHubReleases, HttpClient, ReleaseSource};
use crate::update::{judge, UpdateDecision};
use tracing::{debug, info};

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator {
    /// Validated run configuration
    config: RunConfig,
    /// Where the latest release comes from
    source: Box<dyn ReleaseSource>,
}

impl Orchestrator {
    /// Create a new orchestrator talking to GitHub with the given CLI arguments
    pub fn new(args: &CliArgs) -> Result<Self, AppError> {
        let config = args.run_config()?;

        let mut client = HttpClient::new()?;
        if let Some(token) = &args.github_token {
            client = client.with_token(token);
        }
        debug!(
            api_url = %args.api_url,
            authenticated = client.has_token(),
            "configured GitHub release source"
        );
        let source = GitHubReleases::with_base_url(client, &args.api_url);

        Ok(Self::with_source(config, Box::new(source)))
    }

    /// Create an orchestrator with a custom release source (for testing)
    pub fn with_source(config: RunConfig, source: Box<dyn ReleaseSource>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the update workflow
    pub async fn run(&self) -> Result<RunReport, AppError> {
        let config = &self.config;

        // Step 1: Latest upstream release
        let release = self.source.latest_release(&config.repo).await?;
        debug!(
            repo = %config.repo,
            source = self.source.source_name(),
            tag = %release.tag,
            version = %release.version,
            "fetched latest release"
        );

        // Step 2: Current constraint
        let manifest = PyprojectManifest::load(&config.manifest, config.table.clone())?;
        let current = manifest.specifiers(&config.dependency)?;
        debug!(
            dependency = %config.dependency,
            table = %config.table,
            constraint = %current,
            "read current constraint"
        );

        let mut report = RunReport {
            status: RunStatus::UpToDate,
            dependency: config.dependency.clone(),
            manifest: config.manifest.clone(),
            release,
            current,
            updated: None,
            dry_run: config.dry_run,
        };

        // Step 3: Judge
        let merged = match judge(&report.current, &report.release.version)? {
            UpdateDecision::UpToDate => {
                info!(version = %report.release.version, "constraint already admits latest release");
                return Ok(report);
            }
            UpdateDecision::Required { merged } => merged,
        };

        // Step 4: Write (or not)
        let writer = ManifestWriter::new(config.dry_run);
        writer.apply(&manifest, &config.dependency, &merged)?;

        report.status = if writer.is_dry_run() {
            RunStatus::WouldUpdate
        } else {
            RunStatus::Updated
        };
        report.updated = Some(merged);

        Ok(report)
    }
}
