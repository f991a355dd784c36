//! JSON output formatter for machine processing

use crate::domain::{RunReport, RunStatus};
use crate::output::{OutputFormatter, Verbosity};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Quiet suppresses the document entirely
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of a run
#[derive(Serialize)]
struct JsonOutput<'a> {
    status: RunStatus,
    dependency: &'a str,
    manifest: String,
    latest_version: String,
    release_tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_url: Option<&'a str>,
    current_constraint: String,
    new_constraint: Option<String>,
    dry_run: bool,
}

impl<'a> From<&'a RunReport> for JsonOutput<'a> {
    fn from(report: &'a RunReport) -> Self {
        Self {
            status: report.status,
            dependency: &report.dependency,
            manifest: report.manifest.display().to_string(),
            latest_version: report.release.version.to_string(),
            release_tag: &report.release.tag,
            published_at: report.release.published_at,
            release_url: report.release.url.as_deref(),
            current_constraint: report.current.to_string(),
            new_constraint: report.updated.as_ref().map(ToString::to_string),
            dry_run: report.dry_run,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        let output = JsonOutput::from(report);
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}
