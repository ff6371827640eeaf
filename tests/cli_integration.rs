//! Integration tests for the command-line interface
//!
//! Runs the built binary against scratch workspaces.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const PAGE: &str = "src/pages/meeting/[jobId].tsx";
const SUCCESS_LINE: &str = "Fixed the syntax errors in the meeting file\n";

fn setup_workspace(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let page = dir.path().join(PAGE);
    fs::create_dir_all(page.parent().unwrap()).unwrap();
    fs::write(&page, content).unwrap();
    dir
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_meeting-page-fixer"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--workspace"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_no_arguments_fixes_page_in_cwd() {
    let dir = setup_workspace(include_str!("fixtures/meeting_broken.tsx"));
    let output = run_in(dir.path(), &[]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), SUCCESS_LINE);
    assert_eq!(
        fs::read_to_string(dir.path().join(PAGE)).unwrap(),
        include_str!("fixtures/meeting_fixed.tsx")
    );
}

#[test]
fn test_noop_still_reports_success() {
    let content = include_str!("fixtures/unrelated.tsx");
    let dir = setup_workspace(content);
    let output = run_in(dir.path(), &[]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), SUCCESS_LINE);
    assert_eq!(fs::read_to_string(dir.path().join(PAGE)).unwrap(), content);
}

#[test]
fn test_missing_page_fails_without_creating_it() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &[]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read"));
    assert!(!dir.path().join(PAGE).exists());
}

#[test]
fn test_workspace_flag() {
    let dir = setup_workspace(include_str!("fixtures/agenda_only.tsx"));
    let elsewhere = TempDir::new().unwrap();
    let workspace = dir.path().to_str().unwrap();

    let output = run_in(elsewhere.path(), &["--workspace", workspace]);

    assert!(output.status.success());
    let patched = fs::read_to_string(dir.path().join(PAGE)).unwrap();
    assert!(!patched.contains("candidatePhone"));
}

#[test]
fn test_dry_run_with_diff() {
    let content = include_str!("fixtures/meetings_only.tsx");
    let dir = setup_workspace(content);

    let output = run_in(dir.path(), &["--dry-run", "--diff"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Dry run: the meeting file was not modified\n"));
    assert!(stdout.contains("(original)"));
    assert!(stdout.contains("-          title: \"Phone\","));
    assert_eq!(fs::read_to_string(dir.path().join(PAGE)).unwrap(), content);
}

#[test]
fn test_verbose_reports_per_rule_counts() {
    let dir = setup_workspace(include_str!("fixtures/agenda_only.tsx"));
    let output = run_in(dir.path(), &["--verbose"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), SUCCESS_LINE);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("interview-agenda-body: 1 match"));
    assert!(stderr.contains("create-meeting-body: no match"));
}
