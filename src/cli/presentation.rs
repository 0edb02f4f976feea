//! CLI presentation: text and json formatters per command family.

mod run;
mod tasks;

pub use run::{
    format_plan_json, format_plan_text, format_run_report_json, format_run_report_text,
    format_verify_report_json, format_verify_report_text,
};
pub use tasks::{
    format_check_result_json, format_check_result_text, format_task_list_json,
    format_task_list_text, format_task_list_toml, format_task_show_json, format_task_show_text,
};
