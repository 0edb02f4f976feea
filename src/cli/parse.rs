//! CLI parse: clap types for auxgen. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// auxgen - Code generation directives for the aux Move contracts
#[derive(Parser)]
#[command(name = "auxgen")]
#[command(about = "Run the code generators that produce the aux Move sources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List generation tasks in declaration order
    List {
        /// Include disabled (opt-in) tasks
        #[arg(long)]
        all: bool,
        /// Output format (text, json, or toml)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one task and the command it runs
    Show {
        /// Task name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate the directive table and configuration
    Check {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run every enabled generator
    Run {
        #[command(flatten)]
        selection: TaskSelection,
        /// Print the commands without running them
        #[arg(long)]
        dry_run: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run the enabled generators twice and require identical outputs
    Verify {
        #[command(flatten)]
        selection: TaskSelection,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Which tasks run and how.
#[derive(Args, Debug, Clone, Default)]
pub struct TaskSelection {
    /// Enable an opt-in task (repeatable)
    #[arg(long = "enable", value_name = "TASK")]
    pub enable: Vec<String>,
    /// Run only these tasks (repeatable)
    #[arg(long = "only", value_name = "TASK")]
    pub only: Vec<String>,
    /// Maximum generators running at once
    #[arg(long)]
    pub jobs: Option<usize>,
    /// Per-task timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Create missing output directories
    #[arg(long)]
    pub create_dirs: bool,
}
