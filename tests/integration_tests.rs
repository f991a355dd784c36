//! Integration tests for pinwatch
//!
//! These tests verify:
//! - The full check-and-rewrite workflow against a fake release source
//! - Manifest format preservation around the rewritten entry
//! - Constraint parsing and merging through the public API

use async_trait::async_trait;
use pinwatch::cli::RunConfig;
use pinwatch::domain::{Release, RunReport, RunStatus, Version};
use pinwatch::error::{AppError, ManifestError, RegistryError, SpecError};
use pinwatch::orchestrator::Orchestrator;
use pinwatch::registry::ReleaseSource;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Release source that always answers with the same tag
struct StaticRelease {
    tag: &'static str,
}

#[async_trait]
impl ReleaseSource for StaticRelease {
    fn source_name(&self) -> &'static str {
        "static"
    }

    async fn latest_release(&self, project: &str) -> Result<Release, RegistryError> {
        let version = Version::from_tag(self.tag).map_err(|source| RegistryError::InvalidTag {
            project: project.to_string(),
            tag: self.tag.to_string(),
            source,
        })?;
        Ok(Release::new(self.tag, version))
    }
}

/// Write `content` as pyproject.toml in a fresh temp directory
fn create_project(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("pyproject.toml");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

fn poetry_manifest(constraint: &str) -> String {
    format!(
        r#"[tool.poetry]
name = "sigma-backend"
version = "0.1.0"

[tool.poetry.dependencies]
python = "^3.8"
pysigma = "{}"
"#,
        constraint
    )
}

async fn run(path: &Path, tag: &'static str, dry_run: bool) -> Result<RunReport, AppError> {
    let config = RunConfig::new(path, "pysigma", "SigmaHQ/pySigma").with_dry_run(dry_run);
    Orchestrator::with_source(config, Box::new(StaticRelease { tag }))
        .run()
        .await
}

mod update_scenarios {
    use super::*;

    #[tokio::test]
    async fn test_explicit_range_is_widened() {
        let (_dir, path) = create_project(&poetry_manifest(">=0.9.1, <=0.10.6"));

        let report = run(&path, "v0.10.7", false).await.unwrap();

        assert_eq!(report.status, RunStatus::Updated);
        assert_eq!(report.updated.unwrap().to_string(), ">=0.9.1, <=0.10.7");
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#"pysigma = ">=0.9.1, <=0.10.7""#));
    }

    #[tokio::test]
    async fn test_caret_already_admits_latest() {
        let original = poetry_manifest("^0.10.0");
        let (_dir, path) = create_project(&original);

        let report = run(&path, "v0.10.7", false).await.unwrap();

        assert_eq!(report.status, RunStatus::UpToDate);
        assert!(report.updated.is_none());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_caret_widened_past_minor() {
        let (_dir, path) = create_project(&poetry_manifest("^0.10.0"));

        let report = run(&path, "v0.11.0", false).await.unwrap();

        assert_eq!(report.status, RunStatus::Updated);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#"pysigma = ">=0.10.0, <=0.11.0""#));
    }

    #[tokio::test]
    async fn test_exclusion_is_kept() {
        let (_dir, path) = create_project(&poetry_manifest(">=0.9.0, <0.11.0, !=0.10.5"));

        let report = run(&path, "0.11.0", false).await.unwrap();

        assert_eq!(report.status, RunStatus::Updated);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#"pysigma = ">=0.9.0, !=0.10.5, <=0.11.0""#));
    }

    #[tokio::test]
    async fn test_upper_bound_only() {
        let (_dir, path) = create_project(&poetry_manifest("<=0.10.6"));

        run(&path, "v0.10.7", false).await.unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#"pysigma = "<=0.10.7""#));
    }

    #[tokio::test]
    async fn test_lower_bound_only_needs_no_update() {
        let (_dir, path) = create_project(&poetry_manifest(">=0.9.0"));

        let report = run(&path, "v0.10.7", false).await.unwrap();

        assert_eq!(report.status, RunStatus::UpToDate);
    }

    #[tokio::test]
    async fn test_exact_pin_that_cannot_admit_latest() {
        let original = poetry_manifest("==0.10.6");
        let (_dir, path) = create_project(&original);

        let err = run(&path, "v0.10.7", false).await.unwrap_err();

        assert!(matches!(err, AppError::Spec(SpecError::ExcludesLatest { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_exact_pin_on_latest() {
        let (_dir, path) = create_project(&poetry_manifest("==0.10.7"));

        let report = run(&path, "v0.10.7", false).await.unwrap();

        assert_eq!(report.status, RunStatus::UpToDate);
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let (_dir, path) = create_project(&poetry_manifest(">=0.9.1, <=0.10.6"));

        let first = run(&path, "v0.10.7", false).await.unwrap();
        let after_first = fs::read_to_string(&path).unwrap();
        let second = run(&path, "v0.10.7", false).await.unwrap();

        assert_eq!(first.status, RunStatus::Updated);
        assert_eq!(second.status, RunStatus::UpToDate);
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    }

    #[tokio::test]
    async fn test_dry_run_reports_without_writing() {
        let original = poetry_manifest(">=0.9.1, <=0.10.6");
        let (_dir, path) = create_project(&original);

        let report = run(&path, "v0.10.7", true).await.unwrap();

        assert_eq!(report.status, RunStatus::WouldUpdate);
        assert!(report.status.needs_update());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_missing_entry_aborts_before_write() {
        let original = r#"[tool.poetry.dependencies]
python = "^3.8"
another-dependency = "1.0.0"
"#;
        let (_dir, path) = create_project(original);

        let err = run(&path, "v0.10.7", false).await.unwrap_err();

        assert!(err.is_missing_entry());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_invalid_release_tag_is_fatal() {
        let (_dir, path) = create_project(&poetry_manifest("^0.10.0"));

        let err = run(&path, "nightly", false).await.unwrap_err();

        assert!(matches!(err, AppError::Registry(RegistryError::InvalidTag { .. })));
    }
}

mod manifest_format_preservation {
    use super::*;

    /// Everything except the tracked constraint stays byte-for-byte
    #[tokio::test]
    async fn test_other_dependencies_and_comments_preserved() {
        let original = r#"# Backend for pySigma
[tool.poetry]
name = "sigma-backend"
version = "0.1.0"

[tool.poetry.dependencies]
python = "^3.8"   # interpreter
pysigma = ">=0.9.1, <=0.10.6"  # tracked
requests = { version = "^2.31", optional = true }

[tool.poetry.group.dev.dependencies]
pytest = "^7.4"
"#;
        let (_dir, path) = create_project(original);

        run(&path, "v0.10.7", false).await.unwrap();

        let expected = original.replace(">=0.9.1, <=0.10.6", ">=0.9.1, <=0.10.7");
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_inline_table_entry_rewritten() {
        let original = r#"[tool.poetry.dependencies]
python = "^3.8"
pysigma = { version = "^0.10.0", extras = ["all"] }
"#;
        let (_dir, path) = create_project(original);

        run(&path, "v0.11.0", false).await.unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content
            .contains(r#"pysigma = { version = ">=0.10.0, <=0.11.0", extras = ["all"] }"#));
    }

    #[tokio::test]
    async fn test_sub_table_entry_rewritten() {
        let original = r#"[tool.poetry.dependencies]
python = "^3.8"

[tool.poetry.dependencies.pysigma]
version = "^0.10.0"
extras = ["all"]

[tool.poetry.group.dev.dependencies]
pytest = "^7.4"
"#;
        let (_dir, path) = create_project(original);

        let report = run(&path, "v0.11.0", false).await.unwrap();

        assert_eq!(report.status, RunStatus::Updated);
        let expected = original.replace("^0.10.0", ">=0.10.0, <=0.11.0");
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_nested_array_before_entry() {
        let original = r#"[tool.poetry.dependencies]
python = "^3.8"
matrix = [
    ["linux", "x86_64"],
    ["darwin"]
]
pysigma = ">=0.9.1, <=0.10.6"
"#;
        let (_dir, path) = create_project(original);

        run(&path, "v0.10.7", false).await.unwrap();

        let expected = original.replace("<=0.10.6", "<=0.10.7");
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_group_dependency_rewritten() {
        let original = r#"[tool.poetry.dependencies]
python = "^3.8"
pysigma = "^0.9.0"

[tool.poetry.group.test.dependencies]
pysigma = "^0.10.0"
"#;
        let (_dir, path) = create_project(original);
        let config = RunConfig::new(path.clone(), "pysigma", "SigmaHQ/pySigma").with_group("test");

        let report = Orchestrator::with_source(config, Box::new(StaticRelease { tag: "v0.11.0" }))
            .run()
            .await
            .unwrap();

        assert_eq!(report.status, RunStatus::Updated);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("pysigma = \"^0.9.0\""));
        assert!(content.contains(r#"pysigma = ">=0.10.0, <=0.11.0""#));
    }

    #[tokio::test]
    async fn test_unparseable_manifest_rejected() {
        let (_dir, path) = create_project("[tool.poetry.dependencies\npysigma = \"^0.10.0\"\n");

        let err = run(&path, "v0.11.0", false).await.unwrap_err();

        assert!(matches!(err, AppError::Manifest(ManifestError::TomlParseError { .. })));
    }
}

mod constraint_handling {
    use pinwatch::parser::parse_constraint;
    use pinwatch::update::{judge, merge_specifiers, UpdateDecision};

    #[test]
    fn test_caret_expansion_through_parser() {
        let set = parse_constraint("^1.2.3").unwrap();
        assert_eq!(set.to_string(), ">=1.2.3, <2.0.0");
    }

    #[test]
    fn test_merge_result_admits_latest() {
        let latest = "0.11.0".parse().unwrap();
        for raw in [">=0.9.1, <=0.10.6", "^0.10.0", "<0.11.0", ">=0.9.0, <0.11.0, !=0.10.5"] {
            let merged = merge_specifiers(&parse_constraint(raw).unwrap(), &latest);
            assert!(merged.contains(&latest), "{}", raw);
            assert_eq!(merged.upper_bound_count(), 1, "{}", raw);
        }
    }

    #[test]
    fn test_judge_up_to_date() {
        let current = parse_constraint("^0.10.0").unwrap();
        assert_eq!(judge(&current, &"0.10.7".parse().unwrap()).unwrap(), UpdateDecision::UpToDate);
    }
}
