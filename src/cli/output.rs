//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::GenerateError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &GenerateError) -> String {
    match e {
        GenerateError::ToolNotFound { program, .. } => format!(
            "{}\nhint: make sure '{}' is installed and on PATH",
            e, program
        ),
        _ => e.to_string(),
    }
}
