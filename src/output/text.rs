//! Text output formatter for human-readable display

use crate::domain::{RunReport, RunStatus};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter without colors
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: false,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// The single outcome line
    fn headline(&self, report: &RunReport) -> String {
        let line = match report.status {
            RunStatus::UpToDate => "No update required.".to_string(),
            RunStatus::Updated => format!(
                "Updated {} to include {}",
                report.manifest_name(),
                report.release.version
            ),
            RunStatus::WouldUpdate => format!(
                "Would update {} to include {}",
                report.manifest_name(),
                report.release.version
            ),
        };

        if !self.color {
            return line;
        }
        match report.status {
            RunStatus::UpToDate => line.green().to_string(),
            RunStatus::Updated => line.yellow().bold().to_string(),
            RunStatus::WouldUpdate => line.cyan().to_string(),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        writeln!(writer, "{}", self.headline(report))?;

        if self.verbosity == Verbosity::Verbose {
            match &report.updated {
                Some(updated) => {
                    let arrow = if self.color {
                        "->".dimmed().to_string()
                    } else {
                        "->".to_string()
                    };
                    writeln!(
                        writer,
                        "  {}: {} {} {}",
                        report.dependency, report.current, arrow, updated
                    )?;
                }
                None => {
                    writeln!(
                        writer,
                        "  {}: {} admits {}",
                        report.dependency, report.current, report.release.version
                    )?;
                }
            }
        }

        Ok(())
    }
}
