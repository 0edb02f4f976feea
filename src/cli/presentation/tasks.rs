//! Task presentation: list, show, and check text/json/toml.

use crate::directives::DirectiveTable;
use crate::driver::ToolInvocation;
use crate::error::GenerateError;
use crate::types::GenerationTask;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

fn task_json(task: &GenerationTask) -> serde_json::Value {
    json!({
        "name": task.name,
        "group": task.group,
        "tool": task.tool.spec(),
        "tool_kind": task.tool.kind(),
        "args": task.args,
        "output": task.output_path(),
        "enabled": task.enabled,
    })
}

pub fn format_task_list_text(table: &DirectiveTable, all: bool) -> String {
    let tasks: Vec<&GenerationTask> = table.tasks().iter().filter(|t| all || t.enabled).collect();
    if tasks.is_empty() {
        return "No generation tasks.".to_string();
    }

    let mut out = Table::new();
    out.load_preset(UTF8_BORDERS_ONLY);
    out.set_header(vec!["Task", "Group", "Tool", "Output", "Enabled"]);
    for task in &tasks {
        let output = task
            .output_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        out.add_row(vec![
            task.name.clone(),
            task.group.clone(),
            task.tool.spec(),
            output,
            if task.enabled { "yes" } else { "no" }.to_string(),
        ]);
    }

    let disabled = table.tasks().len() - table.enabled_tasks().count();
    let mut s = format!("{}\n\nTotal: {} task(s)", out, tasks.len());
    if !all && disabled > 0 {
        s.push_str(&format!(
            ", {} opt-in task(s) hidden (use --all)",
            disabled
        ));
    }
    s
}

pub fn format_task_list_json(table: &DirectiveTable, all: bool) -> Result<String, GenerateError> {
    let tasks: Vec<serde_json::Value> = table
        .tasks()
        .iter()
        .filter(|t| all || t.enabled)
        .map(task_json)
        .collect();
    let out = json!({ "tasks": tasks, "total": tasks.len() });
    serde_json::to_string_pretty(&out).map_err(|e| GenerateError::ConfigError(e.to_string()))
}

#[derive(Serialize)]
struct TaskFile<'a> {
    tasks: Vec<&'a GenerationTask>,
}

/// `[[tasks]]` blocks that can be pasted into `auxgen.toml`.
pub fn format_task_list_toml(table: &DirectiveTable, all: bool) -> Result<String, GenerateError> {
    let file = TaskFile {
        tasks: table.tasks().iter().filter(|t| all || t.enabled).collect(),
    };
    toml::to_string_pretty(&file).map_err(|e| GenerateError::ConfigError(e.to_string()))
}

pub fn format_task_show_text(task: &GenerationTask, invocation: &ToolInvocation) -> String {
    let mut s = format!("Task: {}\n", task.name);
    if !task.group.is_empty() {
        s.push_str(&format!("Group: {}\n", task.group));
    }
    s.push_str(&format!("Tool: {} ({})\n", task.tool.spec(), task.tool.kind()));
    s.push_str(&format!("Enabled: {}\n", if task.enabled { "yes" } else { "no" }));
    if let Some(output) = task.output_path() {
        s.push_str(&format!("Output: {}\n", output.display()));
    }
    s.push_str("Arguments:\n");
    for (i, arg) in task.args.iter().enumerate() {
        s.push_str(&format!("  {}. {}\n", i + 1, arg));
    }
    s.push_str(&format!("Working directory: {}\n", invocation.working_dir.display()));
    s.push_str(&format!("Command: {}", invocation.command_line()));
    s
}

pub fn format_task_show_json(
    task: &GenerationTask,
    invocation: &ToolInvocation,
) -> Result<String, GenerateError> {
    let out = json!({ "task": task_json(task), "invocation": invocation });
    serde_json::to_string_pretty(&out).map_err(|e| GenerateError::ConfigError(e.to_string()))
}

pub fn format_check_result_text(table: &DirectiveTable, violations: &[String]) -> String {
    if violations.is_empty() {
        return format!(
            "{}\n  Tasks: {} ({} enabled)\n  All checks passed",
            "Directive table is valid".bold(),
            table.len(),
            table.enabled_tasks().count()
        );
    }
    let mut s = format!(
        "{}\n\nErrors ({}):",
        "Directive table has problems".bold(),
        violations.len()
    );
    for v in violations {
        s.push_str(&format!("\n  - {}", v));
    }
    s
}

pub fn format_check_result_json(
    table: &DirectiveTable,
    violations: &[String],
) -> Result<String, GenerateError> {
    let out = json!({
        "valid": violations.is_empty(),
        "tasks": table.len(),
        "enabled": table.enabled_tasks().count(),
        "errors": violations,
    });
    serde_json::to_string_pretty(&out).map_err(|e| GenerateError::ConfigError(e.to_string()))
}
