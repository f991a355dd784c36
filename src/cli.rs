//! CLI argument parsing module for pinwatch

use crate::error::ConfigError;
use crate::manifest::DependencyTable;
use crate::registry::GITHUB_API_URL;
use clap::Parser;
use std::path::PathBuf;

/// Repository whose releases are tracked by default
pub const DEFAULT_REPOSITORY: &str = "SigmaHQ/pySigma";

/// Dependency whose constraint is maintained by default
pub const DEFAULT_DEPENDENCY: &str = "pysigma";

/// Manifest checked by default
pub const DEFAULT_MANIFEST: &str = "pyproject.toml";

/// Parse the boolean-like positional argument: "true" in any case enables
/// dry-run, every other value disables it
fn parse_dry_run(s: &str) -> Result<bool, String> {
    Ok(s.trim().eq_ignore_ascii_case("true"))
}

/// Keep a pinned dependency constraint in step with its latest upstream release
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pinwatch",
    version,
    about = "Widen a pyproject.toml constraint to admit the latest upstream release",
    after_help = "Exit status: 0 = no update required, 1 = constraint updated (or would be in dry-run), 2 = error"
)]
pub struct CliArgs {
    /// Dry run when "true" (kept for scripts that pass a boolean argument)
    #[arg(value_name = "DRY_RUN", value_parser = parse_dry_run)]
    pub dry_run_arg: Option<bool>,

    /// Dry run mode - report whether an update is needed without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Path to the manifest file
    #[arg(short, long, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,

    /// Dependency whose constraint is maintained
    #[arg(short, long, default_value = DEFAULT_DEPENDENCY)]
    pub dependency: String,

    /// GitHub repository (owner/repo) whose latest release is tracked
    #[arg(short, long, default_value = DEFAULT_REPOSITORY)]
    pub repo: String,

    /// Poetry dependency group holding the entry (default: main dependencies)
    #[arg(short, long)]
    pub group: Option<String>,

    /// GitHub token used to authenticate the API request
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API root URL
    #[arg(long, env = "PINWATCH_API_URL", default_value = GITHUB_API_URL)]
    pub api_url: String,

    /// Output the result in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - no result line, exit status only
    #[arg(short, long)]
    pub quiet: bool,
}

/// Validated settings for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Manifest to check and rewrite
    pub manifest: PathBuf,
    /// Dependency whose constraint is maintained
    pub dependency: String,
    /// owner/repo of the upstream project
    pub repo: String,
    /// Table holding the dependency
    pub table: DependencyTable,
    /// Compute without writing
    pub dry_run: bool,
}

impl RunConfig {
    /// Settings for checking `dependency` in `manifest` against `repo`
    pub fn new(
        manifest: impl Into<PathBuf>,
        dependency: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            manifest: manifest.into(),
            dependency: dependency.into(),
            repo: repo.into(),
            table: DependencyTable::Main,
            dry_run: false,
        }
    }

    /// Use a Poetry dependency group instead of the main table
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.table = DependencyTable::Group(group.into());
        self
    }

    /// Enable or disable dry-run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl CliArgs {
    /// Whether dry-run was requested by flag or positional argument
    pub fn is_dry_run(&self) -> bool {
        self.dry_run || self.dry_run_arg.unwrap_or(false)
    }

    /// Validate the arguments into a run configuration
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        if self.quiet && self.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }

        if !is_valid_repository(&self.repo) {
            return Err(ConfigError::InvalidRepository {
                value: self.repo.clone(),
            });
        }

        let dependency = self.dependency.trim();
        if dependency.is_empty() || dependency.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidDependency {
                value: self.dependency.clone(),
            });
        }

        let mut config = RunConfig::new(self.manifest.clone(), dependency, self.repo.trim())
            .with_dry_run(self.is_dry_run());
        if let Some(group) = self.group.as_deref().map(str::trim) {
            if !group.is_empty() {
                config = config.with_group(group);
            }
        }

        Ok(config)
    }
}

/// `owner/repo` with both parts non-empty and no further separators
fn is_valid_repository(repo: &str) -> bool {
    let valid_part = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };

    match repo.trim().split_once('/') {
        Some((owner, name)) => valid_part(owner) && valid_part(name),
        None => false,
    }
}
