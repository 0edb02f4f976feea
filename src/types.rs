//! Core types: generation tasks and the tools they reference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Flags a generator uses to name the file or directory it writes.
const OUTPUT_FLAGS: [&str; 2] = ["-o", "--output"];

/// External executable a task runs.
///
/// Serialized as `{ remote = "<package>", version = "<version>" }` or
/// `{ local = "<path>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolReference {
    /// Versioned remote package, resolved by the launcher (`go run pkg@version`).
    Remote {
        #[serde(rename = "remote")]
        package: String,
        #[serde(default = "default_version")]
        version: String,
    },
    /// Command path local to the generation working directory.
    Local {
        #[serde(rename = "local")]
        path: String,
    },
}

fn default_version() -> String {
    "latest".to_string()
}

impl ToolReference {
    pub fn remote(package: impl Into<String>, version: impl Into<String>) -> Self {
        ToolReference::Remote {
            package: package.into(),
            version: version.into(),
        }
    }

    pub fn local(path: impl Into<String>) -> Self {
        ToolReference::Local { path: path.into() }
    }

    /// String handed to the launcher, e.g. `github.com/fardream/gen-move-container@latest`.
    pub fn spec(&self) -> String {
        match self {
            ToolReference::Remote { package, version } => format!("{}@{}", package, version),
            ToolReference::Local { path } => path.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ToolReference::Remote { package, version } => {
                package.trim().is_empty() || version.trim().is_empty()
            }
            ToolReference::Local { path } => path.trim().is_empty(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ToolReference::Remote { .. } => "remote",
            ToolReference::Local { .. } => "local",
        }
    }
}

impl fmt::Display for ToolReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec())
    }
}

/// One generation directive: which tool to run, with which arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationTask {
    /// Unique task name
    pub name: String,

    /// Directive block this task belongs to (display only)
    #[serde(default)]
    pub group: String,

    pub tool: ToolReference,

    /// Arguments, passed to the tool exactly in this order
    #[serde(default)]
    pub args: Vec<String>,

    /// Whether the task participates in a default run
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl GenerationTask {
    pub fn new<I, S>(name: &str, group: &str, tool: ToolReference, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            group: group.to_string(),
            tool,
            args: args.into_iter().map(Into::into).collect(),
            enabled: true,
        }
    }

    /// Same task, disabled by default (opt-in).
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Output path embedded in the arguments: the value after the first `-o`/`--output`.
    ///
    /// Also accepts the `--output=<path>` form. Relative to the generation working directory.
    pub fn output_path(&self) -> Option<PathBuf> {
        let mut args = self.args.iter();
        while let Some(arg) = args.next() {
            if OUTPUT_FLAGS.contains(&arg.as_str()) {
                return args.next().map(PathBuf::from);
            }
            if let Some(value) = arg.strip_prefix("--output=") {
                return Some(PathBuf::from(value));
            }
        }
        None
    }
}
