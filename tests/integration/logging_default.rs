//! Integration tests for log destinations.
//!
//! Logs never go to stdout by default, so command output stays machine readable.

use super::test_utils::Fixture;
use std::process::Command;

fn base_command(fixture: &Fixture) -> Command {
    let home = fixture.root().join("home");
    std::fs::create_dir_all(&home).unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_auxgen"));
    cmd.env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_STATE_HOME", fixture.root().join("state"))
        .env_remove("AUXGEN_LOG")
        .env_remove("AUXGEN_LOG_OUTPUT")
        .env_remove("AUXGEN_LOG_FORMAT")
        .arg("--workspace")
        .arg(fixture.root());
    cmd
}

#[test]
fn test_default_logging_goes_to_stderr() {
    let fixture = Fixture::new();
    let output = base_command(&fixture)
        .args(["list", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("auxgen starting"),
        "startup message should be logged to stderr; got: {}",
        stderr
    );
    // stdout must stay parseable
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

#[test]
fn test_file_logging_writes_json_lines() {
    let fixture = Fixture::new();
    let log_file = fixture.root().join("logs").join("auxgen.log");
    let output = base_command(&fixture)
        .args(["--log-output", "file", "--log-format", "json", "--log-file"])
        .arg(&log_file)
        .args(["run", "--dry-run"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stderr).trim().is_empty());

    let content = std::fs::read_to_string(&log_file).unwrap();
    let first = content.lines().next().unwrap();
    let line: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(line["fields"]["message"], "auxgen starting");
}

#[test]
fn test_default_log_file_under_state_dir() {
    let fixture = Fixture::new();
    let output = base_command(&fixture)
        .args(["--log-output", "file", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let log_file = fixture.root().join("state").join("auxgen").join("auxgen.log");
    assert!(log_file.exists(), "log file should exist at {}", log_file.display());
}

#[test]
fn test_quiet_disables_logging() {
    let fixture = Fixture::new();
    let output = base_command(&fixture)
        .args(["--quiet", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}
