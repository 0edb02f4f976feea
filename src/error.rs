//! Error types for the generation directive table and its driver.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by table validation, configuration, and task execution.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Tool not found for task '{task}': {program} ({source})")]
    ToolNotFound {
        task: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Task '{task}' failed with {}{}", describe_exit(.code), format_stderr(.stderr))]
    ToolFailed {
        task: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Output for task '{task}' is not writable: {} ({reason})", .path.display())]
    OutputUnwritable {
        task: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Task '{task}' timed out after {} ms", .timeout.as_millis())]
    TimedOut { task: String, timeout: Duration },

    #[error("Invalid directive table:\n{}", list_violations(.0))]
    InvalidTable(Vec<String>),

    /// Failed `check`; `report` is the rendered result for stdout.
    #[error("Invalid directive table:\n{}", list_violations(.violations))]
    CheckFailed {
        report: String,
        violations: Vec<String>,
    },

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Outputs differ between consecutive runs: {}", .0.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    NotIdempotent(Vec<PathBuf>),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GenerateError {
    /// Command output that should still reach stdout when the command fails.
    pub fn report(&self) -> Option<&str> {
        match self {
            GenerateError::CheckFailed { report, .. } => Some(report),
            _ => None,
        }
    }
}

fn list_violations(violations: &[String]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {}", v))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "termination by signal".to_string(),
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{}", trimmed)
    }
}

impl From<config::ConfigError> for GenerateError {
    fn from(err: config::ConfigError) -> Self {
        GenerateError::ConfigError(err.to_string())
    }
}
