#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn failing_run(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("autocoder"));
    cmd.current_dir(home)
        .env("AUTOCODER_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("GROQ_API_KEY")
        .env_remove("RUST_LOG")
        .args(["--prompt", "test logging", "--recursion-limit", "3"]);
    cmd
}

#[test]
fn test_default_logging_keeps_info_events_quiet() {
    let temp = tempfile::TempDir::new().unwrap();

    failing_run(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invoking agent workflow").not())
        .stdout(predicate::str::contains("\"level\":").not());
}

#[test]
fn test_verbose_logging_reports_workflow_events() {
    let temp = tempfile::TempDir::new().unwrap();

    failing_run(temp.path())
        .arg("-v")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invoking agent workflow"))
        .stderr(predicate::str::contains(" INFO "));
}

#[test]
fn test_json_logging_flag_emits_json_on_stderr() {
    let temp = tempfile::TempDir::new().unwrap();

    failing_run(temp.path())
        .args(["--log-json", "-v"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\"level\":"))
        .stdout(predicate::str::contains("\"level\":").not());
}

#[test]
fn test_every_run_writes_a_json_log_file() {
    let temp = tempfile::TempDir::new().unwrap();

    failing_run(temp.path()).assert().code(1);

    let log_dir = temp.path().join(".autocoder").join("logs");
    let logs: Vec<_> = std::fs::read_dir(&log_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("run-"))
        .collect();
    assert_eq!(logs.len(), 1);

    let contents = std::fs::read_to_string(logs[0].path()).unwrap();
    assert!(contents.contains("Agent workflow finished"));
    assert!(contents.contains("\"outcome\":\"failed\""));
}

#[test]
fn test_rust_log_from_dotenv_reaches_the_console_filter() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(temp.path().join(".env"), "RUST_LOG=autocoder=info\n").unwrap();

    failing_run(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invoking agent workflow"));
}
