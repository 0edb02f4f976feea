//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::{Commands, TaskSelection};
use crate::cli::presentation::{
    format_check_result_json, format_check_result_text, format_plan_json, format_plan_text,
    format_run_report_json, format_run_report_text, format_task_list_json, format_task_list_text,
    format_task_list_toml, format_task_show_json, format_task_show_text,
    format_verify_report_json, format_verify_report_text,
};
use crate::config::{AuxgenConfig, ConfigLoader};
use crate::directives::DirectiveTable;
use crate::driver::{Driver, DriverSettings, ToolInvocation};
use crate::error::GenerateError;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

/// Runtime context for CLI execution: workspace root and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: AuxgenConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, GenerateError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        let workspace_root = dunce::canonicalize(&workspace_root).map_err(|e| {
            GenerateError::ConfigError(format!(
                "Workspace {} is not accessible: {}",
                workspace_root.display(),
                e
            ))
        })?;
        debug!(workspace = %workspace_root.display(), "Run context ready");
        Ok(Self::with_config(workspace_root, config))
    }

    /// Context over an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: AuxgenConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &AuxgenConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, GenerateError> {
        let span = info_span!("command", name = command_name(command));
        let _enter = span.enter();

        match command {
            Commands::List { all, format } => {
                let table = self.config.directive_table()?;
                match format.as_str() {
                    "json" => format_task_list_json(&table, *all),
                    "toml" => format_task_list_toml(&table, *all),
                    _ => Ok(format_task_list_text(&table, *all)),
                }
            }
            Commands::Show { name, format } => {
                let table = self.config.directive_table()?;
                let task = table
                    .get(name)
                    .ok_or_else(|| GenerateError::UnknownTask(name.clone()))?;
                let settings = self.driver_settings(&TaskSelection::default());
                let invocation =
                    ToolInvocation::for_task(task, &settings.launcher, &settings.working_dir);
                if format == "json" {
                    format_task_show_json(task, &invocation)
                } else {
                    Ok(format_task_show_text(task, &invocation))
                }
            }
            Commands::Check { format } => {
                let table = self.config.directive_table()?;
                let mut violations = Vec::new();
                if let Err(e) = self.config.generate.validate() {
                    violations.push(format!("generate: {}", e));
                }
                violations.extend(table.violations());

                let rendered = if format == "json" {
                    format_check_result_json(&table, &violations)?
                } else {
                    format_check_result_text(&table, &violations)
                };
                if violations.is_empty() {
                    Ok(rendered)
                } else {
                    Err(GenerateError::CheckFailed {
                        report: rendered,
                        violations,
                    })
                }
            }
            Commands::Run {
                selection,
                dry_run,
                format,
            } => {
                let table = self.select(selection)?;
                let driver = self.driver(selection)?;
                if *dry_run {
                    let plan = driver.plan(&table)?;
                    return if format == "json" {
                        format_plan_json(&plan)
                    } else {
                        Ok(format_plan_text(&plan))
                    };
                }
                let report = block_on(driver.run(&table))?;
                if format == "json" {
                    format_run_report_json(&report)
                } else {
                    Ok(format_run_report_text(&report))
                }
            }
            Commands::Verify { selection, format } => {
                let table = self.select(selection)?;
                let driver = self.driver(selection)?;
                let report = block_on(driver.verify(&table))?;
                if format == "json" {
                    format_verify_report_json(&report)
                } else {
                    Ok(format_verify_report_text(&report))
                }
            }
        }
    }

    /// Table for a run: configured opt-ins, then `--enable`, then `--only`.
    fn select(&self, selection: &TaskSelection) -> Result<DirectiveTable, GenerateError> {
        self.config
            .directive_table()?
            .enable(&selection.enable)?
            .only(&selection.only)
    }

    fn driver_settings(&self, selection: &TaskSelection) -> DriverSettings {
        let mut settings = DriverSettings::from_config(&self.config.generate, &self.workspace_root);
        if let Some(jobs) = selection.jobs {
            settings.jobs = jobs;
        }
        if let Some(secs) = selection.timeout {
            settings.timeout = Some(std::time::Duration::from_secs(secs));
        }
        settings.create_dirs |= selection.create_dirs;
        settings
    }

    fn driver(&self, selection: &TaskSelection) -> Result<Driver, GenerateError> {
        self.config
            .generate
            .validate()
            .map_err(|e| GenerateError::ConfigError(format!("generate: {}", e)))?;
        let settings = self.driver_settings(selection);
        if settings.jobs == 0 {
            return Err(GenerateError::ConfigError(
                "--jobs must be at least 1".to_string(),
            ));
        }
        Ok(Driver::new(settings))
    }
}

fn block_on<T, F>(future: F) -> Result<T, GenerateError>
where
    F: std::future::Future<Output = Result<T, GenerateError>>,
{
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| GenerateError::ConfigError(format!("Failed to create runtime: {}", e)))?;
    rt.block_on(future)
}
