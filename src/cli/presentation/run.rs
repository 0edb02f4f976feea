//! Run presentation: dry-run plans, run reports, verify reports.

use crate::driver::{RunReport, ToolInvocation, VerifyReport};
use crate::error::GenerateError;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn format_plan_text(plan: &[ToolInvocation]) -> String {
    if plan.is_empty() {
        return "No enabled generation tasks.".to_string();
    }
    let mut s = format!("Would run {} generator(s):", plan.len());
    for inv in plan {
        s.push_str(&format!("\n  [{}] (cd {} && {})", inv.task, inv.working_dir.display(), inv.command_line()));
    }
    s
}

pub fn format_plan_json(plan: &[ToolInvocation]) -> Result<String, GenerateError> {
    let out = json!({ "dry_run": true, "invocations": plan });
    serde_json::to_string_pretty(&out).map_err(|e| GenerateError::ConfigError(e.to_string()))
}

pub fn format_run_report_text(report: &RunReport) -> String {
    let mut s = format!(
        "{}\nGenerated {} file(s) in {} ms",
        "Generation complete".green().bold(),
        report.task_count(),
        report.duration_ms
    );
    for outcome in &report.outcomes {
        let output = outcome
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        s.push_str(&format!(
            "\n  {:<22} {:>6} ms  {}",
            outcome.task, outcome.duration_ms, output
        ));
    }
    s
}

pub fn format_run_report_json(report: &RunReport) -> Result<String, GenerateError> {
    serde_json::to_string_pretty(report).map_err(|e| GenerateError::ConfigError(e.to_string()))
}

pub fn format_verify_report_text(report: &VerifyReport) -> String {
    let mut s = format!(
        "{}\nOutputs identical across 2 runs ({} path(s))",
        "Generation is idempotent".green().bold(),
        report.snapshot.digests.len()
    );
    for (path, digest) in &report.snapshot.digests {
        let digest = digest.as_deref().map(|d| &d[..16]).unwrap_or("absent");
        s.push_str(&format!("\n  {}  {}", digest, path.display()));
    }
    s
}

pub fn format_verify_report_json(report: &VerifyReport) -> Result<String, GenerateError> {
    let out = json!({
        "idempotent": true,
        "runs": [report.first.duration_ms, report.second.duration_ms],
        "digests": report.snapshot.digests,
    });
    serde_json::to_string_pretty(&out).map_err(|e| GenerateError::ConfigError(e.to_string()))
}
