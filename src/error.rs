//! Application error types using thiserror
//!
//! Error hierarchy:
//! - RegistryError: Issues fetching the latest upstream release
//! - ManifestError: Issues reading or rewriting the manifest file
//! - SpecError: Malformed versions, specifiers and constraints
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Release source related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Version and constraint parsing errors
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to fetching release information
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Network request failed or returned an error status
    #[error("failed to fetch latest release of '{project}' from {registry}: {message}")]
    NetworkError {
        project: String,
        registry: String,
        message: String,
    },

    /// Project or release not found
    #[error("no published release found for '{project}' on {registry}")]
    NotFound { project: String, registry: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} (set GITHUB_TOKEN to raise the limit)")]
    RateLimitExceeded { registry: String },

    /// Timeout
    #[error("timeout while fetching latest release of '{project}' from {registry}")]
    Timeout { project: String, registry: String },

    /// Response body could not be decoded
    #[error("invalid response from {registry} for '{project}': {message}")]
    InvalidResponse {
        project: String,
        registry: String,
        message: String,
    },

    /// Release tag is not a usable version
    #[error("release tag '{tag}' of '{project}' is not a version: {source}")]
    InvalidTag {
        project: String,
        tag: String,
        #[source]
        source: SpecError,
    },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// Tracked dependency is absent from its table
    #[error("dependency '{dependency}' not found in [{table}] of {path}")]
    MissingEntry {
        path: PathBuf,
        table: String,
        dependency: String,
    },

    /// Entry exists but carries no version constraint (git, path, url...)
    #[error("dependency '{dependency}' in {path} has no version constraint")]
    UnsupportedEntry { path: PathBuf, dependency: String },

    /// Entry holds a constraint that does not parse
    #[error("invalid constraint for '{dependency}' in {path}: {source}")]
    InvalidConstraint {
        path: PathBuf,
        dependency: String,
        #[source]
        source: SpecError,
    },

    /// Entry could not be located in the source text for rewriting
    #[error("cannot rewrite '{dependency}' in {path}: {message}")]
    EntryNotWritable {
        path: PathBuf,
        dependency: String,
        message: String,
    },
}

/// Errors related to versions and specifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Malformed version string
    #[error("invalid version '{input}': {message}")]
    InvalidVersion { input: String, message: String },

    /// Malformed specifier token
    #[error("invalid specifier '{input}': {message}")]
    InvalidSpecifier { input: String, message: String },

    /// Malformed caret shorthand
    #[error("invalid caret constraint '{input}': {message}")]
    InvalidCaret { input: String, message: String },

    /// Constraint string with no specifiers
    #[error("empty version constraint")]
    EmptyConstraint,

    /// Merged constraint still rejects the latest version
    #[error("constraint '{constraint}' excludes {version} even after raising its upper bound")]
    ExcludesLatest { constraint: String, version: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Repository is not in owner/repo form
    #[error("invalid repository '{value}': expected 'owner/repo'")]
    InvalidRepository { value: String },

    /// Dependency name is empty or malformed
    #[error("invalid dependency name '{value}'")]
    InvalidDependency { value: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

impl RegistryError {
    /// Creates a new NetworkError
    pub fn network_error(
        project: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            project: project.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new NotFound error
    pub fn not_found(project: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::NotFound {
            project: project.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(project: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            project: project.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        project: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            project: project.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new MissingEntry error
    pub fn missing_entry(
        path: impl Into<PathBuf>,
        table: impl Into<String>,
        dependency: impl Into<String>,
    ) -> Self {
        ManifestError::MissingEntry {
            path: path.into(),
            table: table.into(),
            dependency: dependency.into(),
        }
    }

    /// Creates a new EntryNotWritable error
    pub fn entry_not_writable(
        path: impl Into<PathBuf>,
        dependency: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ManifestError::EntryNotWritable {
            path: path.into(),
            dependency: dependency.into(),
            message: message.into(),
        }
    }
}

impl SpecError {
    /// Creates a new InvalidVersion error
    pub fn invalid_version(input: impl Into<String>, message: impl Into<String>) -> Self {
        SpecError::InvalidVersion {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidSpecifier error
    pub fn invalid_specifier(input: impl Into<String>, message: impl Into<String>) -> Self {
        SpecError::InvalidSpecifier {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidCaret error
    pub fn invalid_caret(input: impl Into<String>, message: impl Into<String>) -> Self {
        SpecError::InvalidCaret {
            input: input.into(),
            message: message.into(),
        }
    }
}

impl AppError {
    /// Returns true if the tracked dependency is absent from the manifest
    pub fn is_missing_entry(&self) -> bool {
        matches!(self, AppError::Manifest(ManifestError::MissingEntry { .. }))
    }
}
