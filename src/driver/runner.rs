//! Task execution: spawns generator tools for every enabled directive.

use super::invocation::ToolInvocation;
use super::report::{RunReport, TaskOutcome};
use crate::config::GenerateConfig;
use crate::digest::OutputSnapshot;
use crate::directives::DirectiveTable;
use crate::error::GenerateError;
use chrono::Utc;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// How the driver runs tools.
#[derive(Debug, Clone)]
pub struct DriverSettings {
    /// Command prefix for tool references; empty runs the tool directly
    pub launcher: Vec<String>,
    /// Directory every tool runs in
    pub working_dir: PathBuf,
    /// Maximum concurrent tools
    pub jobs: usize,
    pub timeout: Option<Duration>,
    /// Create missing output directories
    pub create_dirs: bool,
}

impl DriverSettings {
    pub fn from_config(config: &GenerateConfig, workspace_root: &Path) -> Self {
        Self {
            launcher: config.launcher.clone(),
            working_dir: config.resolve_workdir(workspace_root),
            jobs: config.jobs.max(1),
            timeout: config.timeout(),
            create_dirs: config.create_dirs,
        }
    }
}

/// Result of running the enabled set twice.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub first: RunReport,
    pub second: RunReport,
    pub snapshot: OutputSnapshot,
}

/// Executes a directive table.
pub struct Driver {
    settings: DriverSettings,
}

impl Driver {
    pub fn new(settings: DriverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    /// Validated invocations for the enabled tasks, in declaration order. Spawns nothing.
    pub fn plan(&self, table: &DirectiveTable) -> Result<Vec<ToolInvocation>, GenerateError> {
        table.validate()?;
        Ok(table
            .enabled_tasks()
            .map(|task| {
                ToolInvocation::for_task(task, &self.settings.launcher, &self.settings.working_dir)
            })
            .collect())
    }

    /// Run every enabled task. The first failure aborts the run; tools still
    /// running are killed and their results discarded.
    pub async fn run(&self, table: &DirectiveTable) -> Result<RunReport, GenerateError> {
        let plan = self.plan(table)?;
        self.check_working_dir()?;
        for invocation in &plan {
            self.prepare_output(invocation)?;
        }

        let started_at = Utc::now();
        let started = Instant::now();
        info!(
            tasks = plan.len(),
            jobs = self.settings.jobs,
            working_dir = %self.settings.working_dir.display(),
            "Starting generation run"
        );

        let mut outcomes: Vec<(usize, TaskOutcome)> = stream::iter(plan.iter().enumerate())
            .map(|(index, invocation)| async move {
                self.execute(invocation).await.map(|outcome| (index, outcome))
            })
            .buffer_unordered(self.settings.jobs)
            .try_collect()
            .await
            .map_err(|e| {
                error!(error = %e, "Generation run failed");
                e
            })?;
        outcomes.sort_by_key(|(index, _)| *index);

        let report = RunReport {
            started_at,
            duration_ms: started.elapsed().as_millis() as u64,
            outcomes: outcomes.into_iter().map(|(_, o)| o).collect(),
        };
        info!(
            tasks = report.task_count(),
            duration_ms = report.duration_ms,
            "Generation run completed"
        );
        Ok(report)
    }

    /// Run the enabled set twice and require byte-identical outputs.
    pub async fn verify(&self, table: &DirectiveTable) -> Result<VerifyReport, GenerateError> {
        let outputs: Vec<PathBuf> = self
            .plan(table)?
            .iter()
            .filter_map(ToolInvocation::resolved_output)
            .collect();

        let first = self.run(table).await?;
        let before = OutputSnapshot::capture(outputs.clone())?;
        let second = self.run(table).await?;
        let after = OutputSnapshot::capture(outputs)?;

        let diff = before.diff(&after);
        if !diff.is_empty() {
            warn!(paths = ?diff.paths(), "Generated outputs changed on re-run");
            return Err(GenerateError::NotIdempotent(diff.paths()));
        }
        Ok(VerifyReport {
            first,
            second,
            snapshot: after,
        })
    }

    fn check_working_dir(&self) -> Result<(), GenerateError> {
        if self.settings.working_dir.is_dir() {
            Ok(())
        } else {
            Err(GenerateError::ConfigError(format!(
                "Working directory does not exist: {}",
                self.settings.working_dir.display()
            )))
        }
    }

    /// Ensure the output's parent directory exists and is writable.
    fn prepare_output(&self, invocation: &ToolInvocation) -> Result<(), GenerateError> {
        let Some(output) = invocation.resolved_output() else {
            return Ok(());
        };
        let Some(parent) = output.parent() else {
            return Ok(());
        };
        let unwritable = |reason: String| GenerateError::OutputUnwritable {
            task: invocation.task.clone(),
            path: output.clone(),
            reason,
        };

        if !parent.exists() {
            if !self.settings.create_dirs {
                return Err(unwritable(format!(
                    "directory {} does not exist",
                    parent.display()
                )));
            }
            debug!(task = %invocation.task, dir = %parent.display(), "Creating output directory");
            std::fs::create_dir_all(parent).map_err(|e| unwritable(e.to_string()))?;
        }

        let metadata = std::fs::metadata(parent).map_err(|e| unwritable(e.to_string()))?;
        if !metadata.is_dir() {
            return Err(unwritable(format!("{} is not a directory", parent.display())));
        }
        if metadata.permissions().readonly() {
            return Err(unwritable(format!("{} is read-only", parent.display())));
        }
        Ok(())
    }

    async fn execute(&self, invocation: &ToolInvocation) -> Result<TaskOutcome, GenerateError> {
        let command = invocation.command_line();
        info!(task = %invocation.task, command = %command, "Running generator");
        let started = Instant::now();

        let mut cmd = invocation.to_command();
        let output = match self.settings.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| GenerateError::TimedOut {
                    task: invocation.task.clone(),
                    timeout: limit,
                })?,
            None => cmd.output().await,
        }
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => GenerateError::ToolNotFound {
                task: invocation.task.clone(),
                program: invocation.program.clone(),
                source: e,
            },
            _ => GenerateError::IoError(e),
        })?;

        let duration_ms = started.elapsed().as_millis() as u64;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let exit_code = output.status.code();

        if !output.status.success() {
            error!(
                task = %invocation.task,
                exit_code = ?exit_code,
                duration_ms,
                "Generator failed"
            );
            return Err(GenerateError::ToolFailed {
                task: invocation.task.clone(),
                code: exit_code,
                stderr,
            });
        }

        info!(task = %invocation.task, duration_ms, "Generator finished");
        Ok(TaskOutcome {
            task: invocation.task.clone(),
            command,
            exit_code,
            duration_ms,
            stdout,
            stderr,
            output: invocation.resolved_output(),
        })
    }
}
