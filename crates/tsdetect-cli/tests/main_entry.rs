//! Integration tests for the `tsdetect` binary entry point.
//!
//! Covers help output, the soft skip on a missing test list, dry runs, and
//! usage errors.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

#[test]
fn help_prints_to_stdout() {
    let mut command = cargo_bin_cmd!("tsdetect");
    command.arg("--help");
    command
        .assert()
        .success()
        .stdout(contains("--dry-run"));
}

#[test]
fn version_prints_to_stdout() {
    let mut command = cargo_bin_cmd!("tsdetect");
    command.arg("--version");
    command.assert().success().stdout(contains("tsdetect"));
}

#[test]
fn missing_test_list_is_not_a_failure() -> anyhow::Result<()> {
    let project = TempDir::new()?;
    let mut command = cargo_bin_cmd!("tsdetect");
    command.arg("--project-root").arg(project.path());
    command
        .assert()
        .success()
        .stderr(contains("test list not found"));
    Ok(())
}

#[test]
fn bare_run_in_empty_directory_skips() -> anyhow::Result<()> {
    let project = TempDir::new()?;
    let mut command = cargo_bin_cmd!("tsdetect");
    command
        .current_dir(project.path())
        .env_remove("TSDETECT_MANIFEST_PATH")
        .env_remove("TSDETECT_PROJECT_ROOT");
    command
        .assert()
        .success()
        .stderr(contains("test list not found"));
    Ok(())
}

#[test]
fn dry_run_prints_the_command() -> anyhow::Result<()> {
    let project = TempDir::new()?;
    let mut command = cargo_bin_cmd!("tsdetect");
    command
        .arg("--project-root")
        .arg(project.path())
        .arg("--manifest-path=qa/list.csv")
        .arg("--dry-run");
    command.assert().success().stdout(
        contains("list.csv (missing)")
            .and(contains("command: java -jar <TestSmellDetector.jar>")),
    );
    Ok(())
}

#[test]
fn unknown_flags_fail() {
    let mut command = cargo_bin_cmd!("tsdetect");
    command.arg("--bogus");
    command.assert().failure().stderr(contains("--bogus"));
}
