//! CLI command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Command name string for logs (e.g. "run", "verify").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::List { .. } => "list",
        Commands::Show { .. } => "show",
        Commands::Check { .. } => "check",
        Commands::Run { dry_run: true, .. } => "run.dry_run",
        Commands::Run { .. } => "run",
        Commands::Verify { .. } => "verify",
    }
}
