//! Run results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Result of one successful tool run.
#[derive(Debug, Clone, Serialize)]
pub struct TaskOutcome {
    pub task: String,
    pub command: String,
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    pub stdout: String,
    pub stderr: String,
    /// Resolved output path, if the task declares one
    pub output: Option<PathBuf>,
}

/// Outcome of a generation run. Only produced when every task succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// In declaration order
    pub outcomes: Vec<TaskOutcome>,
}

impl RunReport {
    pub fn task_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &PathBuf> {
        self.outcomes.iter().filter_map(|o| o.output.as_ref())
    }
}
