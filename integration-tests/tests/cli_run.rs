#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary command isolated from the developer's home, cwd and credentials.
fn autocoder(temp: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("autocoder"));
    cmd.current_dir(temp.path())
        .env("AUTOCODER_HOME", temp.path())
        .env_remove("GROQ_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn empty_prompt_exits_one_without_running_the_agent() {
    let temp = TempDir::new().unwrap();

    autocoder(&temp)
        .arg("--prompt")
        .arg("   ")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Output directory:"))
        .stdout(predicate::str::contains("Starting agent workflow").not())
        .stderr(predicate::str::contains("Error: Empty prompt provided"));

    assert!(temp.path().join("generated_project").is_dir());
}

#[test]
fn empty_interactive_input_is_rejected() {
    let temp = TempDir::new().unwrap();

    autocoder(&temp)
        .write_stdin("\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Enter your project description:"))
        .stderr(predicate::str::contains("Error: Empty prompt provided"));
}

#[test]
fn missing_credentials_surface_as_workflow_failure() {
    let temp = TempDir::new().unwrap();

    autocoder(&temp)
        .args(["-p", "Build X", "-r", "5"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Request: Build X"))
        .stderr(predicate::str::contains("ERROR OCCURRED"))
        .stderr(predicate::str::contains("GROQ_API_KEY"))
        .stderr(predicate::str::contains("Try reducing --recursion-limit"));
}

#[test]
fn output_dir_flag_overrides_the_default_root() {
    let temp = TempDir::new().unwrap();
    let custom = temp.path().join("custom-out");

    autocoder(&temp)
        .arg("--output-dir")
        .arg(&custom)
        .arg("-p")
        .arg("")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("custom-out"));

    assert!(custom.is_dir());
    assert!(!temp.path().join("generated_project").exists());
}

#[test]
fn zero_recursion_limit_is_a_usage_error() {
    let temp = TempDir::new().unwrap();

    autocoder(&temp)
        .args(["--recursion-limit", "0", "-p", "Build X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("recursion-limit"));
}

#[test]
fn invalid_config_exits_one() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("autocoder.yaml");
    std::fs::write(&config, "agent:\n  temperature: 9.0\n").unwrap();

    autocoder(&temp)
        .arg("--config")
        .arg(&config)
        .args(["-p", "Build X"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("temperature"));
}

#[test]
fn help_lists_example_prompts() {
    let temp = TempDir::new().unwrap();

    autocoder(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--recursion-limit"))
        .stdout(predicate::str::contains("Example prompts:"));
}

#[cfg(unix)]
#[test]
fn ctrl_c_while_typing_exits_zero() {
    use std::io::{BufRead, BufReader, Read};
    use std::process::{Command as StdCommand, Stdio};
    use std::time::Duration;

    let temp = TempDir::new().unwrap();
    let mut child = StdCommand::new(assert_cmd::cargo::cargo_bin("autocoder"))
        .current_dir(temp.path())
        .env("AUTOCODER_HOME", temp.path())
        .env_remove("GROQ_API_KEY")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // Held open so the prompt read keeps blocking.
    let _stdin = child.stdin.take().unwrap();

    let mut stdout = BufReader::new(child.stdout.take().unwrap());
    let mut seen = String::new();
    while !seen.contains("Enter your project description:") {
        let mut line = String::new();
        assert_ne!(stdout.read_line(&mut line).unwrap(), 0, "stdout closed early");
        seen.push_str(&line);
    }
    std::thread::sleep(Duration::from_millis(300));

    let status = StdCommand::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let exit = child.wait().unwrap();
    stdout.read_to_string(&mut seen).unwrap();
    let mut stderr = String::new();
    child.stderr.take().unwrap().read_to_string(&mut stderr).unwrap();

    assert_eq!(exit.code(), Some(0));
    assert!(seen.contains("Operation cancelled by user."));
    assert!(!stderr.contains("ERROR OCCURRED"));
}
