//! Configuration System
//!
//! Layered configuration for the generation driver: built-in defaults, the global
//! config file, the workspace `auxgen.toml`, then `AUXGEN_*` environment variables.
//! A config file may also replace the built-in directive table with `[[tasks]]`.

use crate::directives::DirectiveTable;
use crate::error::GenerateError;
use crate::logging::LoggingConfig;
use crate::types::GenerationTask;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuxgenConfig {
    /// Driver settings
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Replacement directive table; empty means the built-in table
    #[serde(default)]
    pub tasks: Vec<GenerationTask>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How tasks are executed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Directory tools run in, relative to the workspace root. Output paths are relative to it.
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,

    /// Command prefix used to run a tool reference (`go run <tool> <args>`)
    #[serde(default = "default_launcher")]
    pub launcher: Vec<String>,

    /// Maximum number of tools running at once
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Per-task timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Create missing output directories instead of failing
    #[serde(default)]
    pub create_dirs: bool,

    /// Opt-in tasks to enable for every run
    #[serde(default)]
    pub enable: Vec<String>,
}

fn default_workdir() -> PathBuf {
    PathBuf::from("go-util")
}

fn default_launcher() -> Vec<String> {
    vec!["go".to_string(), "run".to_string()]
}

pub(crate) fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            workdir: default_workdir(),
            launcher: default_launcher(),
            jobs: default_jobs(),
            timeout_secs: None,
            create_dirs: false,
            enable: Vec::new(),
        }
    }
}

impl GenerateConfig {
    /// Working directory resolved against the workspace root.
    pub fn resolve_workdir(&self, workspace_root: &Path) -> PathBuf {
        if self.workdir.is_absolute() {
            self.workdir.clone()
        } else {
            workspace_root.join(&self.workdir)
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.jobs == 0 {
            return Err("jobs must be at least 1".to_string());
        }
        if self.launcher.iter().any(|part| part.trim().is_empty()) {
            return Err("launcher entries cannot be empty".to_string());
        }
        if self.timeout_secs == Some(0) {
            return Err("timeout_secs must be positive".to_string());
        }
        Ok(())
    }
}

impl AuxgenConfig {
    /// The directive table this configuration runs, with configured opt-ins applied.
    pub fn directive_table(&self) -> Result<DirectiveTable, GenerateError> {
        let table = if self.tasks.is_empty() {
            DirectiveTable::builtin()
        } else {
            DirectiveTable::from_tasks(self.tasks.clone())
        };
        table.enable(&self.generate.enable)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), GenerateError> {
        let mut errors = Vec::new();

        if let Err(e) = self.generate.validate() {
            errors.push(format!("generate: {}", e));
        }

        match self.directive_table() {
            Ok(table) => errors.extend(table.violations()),
            Err(e) => errors.push(e.to_string()),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(GenerateError::InvalidTable(errors))
        }
    }
}
