//! Generation Directive Table
//!
//! The ordered list of generation tasks for the aux Move contracts. The table is
//! read-only during a run; opting tasks in or narrowing a run produces a new table.

use crate::error::GenerateError;
use crate::types::{GenerationTask, ToolReference};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Remote container generator producing critbit trees.
pub const CONTAINER_GENERATOR: &str = "github.com/fardream/gen-move-container";
pub const CONTAINER_GENERATOR_VERSION: &str = "latest";
pub const REWARD_DISTRIBUTOR_GENERATOR: &str = "./aptos/cmd/gen-reward-distributor";
pub const ABORT_ONLY_TRANSFORM: &str = "./cmd/move-abort";

const SOURCES_DIR: &str = "../aptos/contract/auxexch/sources";

/// Ordered generation directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveTable {
    tasks: Vec<GenerationTask>,
}

impl DirectiveTable {
    /// Build a table from tasks, keeping declaration order.
    pub fn from_tasks(tasks: Vec<GenerationTask>) -> Self {
        Self { tasks }
    }

    /// The directives shipped with the aux contracts.
    pub fn builtin() -> Self {
        let container = || ToolReference::remote(CONTAINER_GENERATOR, CONTAINER_GENERATOR_VERSION);
        let distributor = || ToolReference::local(REWARD_DISTRIBUTOR_GENERATOR);
        let sources = |file: &str| format!("{}/{}", SOURCES_DIR, file);

        Self::from_tasks(vec![
            GenerationTask::new(
                "critbit_v",
                "critbit",
                container(),
                [
                    "critbit".to_string(),
                    "-o".to_string(),
                    sources("critbit_v.move"),
                    "-p".to_string(),
                    "aux".to_string(),
                    "-m".to_string(),
                    "critbit_v".to_string(),
                ],
            ),
            GenerationTask::new(
                "critbit",
                "critbit",
                container(),
                [
                    "critbit".to_string(),
                    "-o".to_string(),
                    sources("critbit.move"),
                    "-p".to_string(),
                    "aux".to_string(),
                    "-m".to_string(),
                    "critbit".to_string(),
                    "--use-aptos-table".to_string(),
                ],
            ),
            GenerationTask::new(
                "reward_distributor",
                "reward distributor",
                distributor(),
                ["-o".to_string(), sources("reward_distributor.move")],
            ),
            GenerationTask::new(
                "reward_quoter",
                "reward distributor",
                distributor(),
                [
                    "-q".to_string(),
                    "-o".to_string(),
                    sources("reward_quoter.move"),
                ],
            ),
            GenerationTask::new(
                "abort_only_contract",
                "abort-only-contract",
                ToolReference::local(ABORT_ONLY_TRANSFORM),
                [
                    "-e",
                    "authority.move",
                    "-i",
                    SOURCES_DIR,
                    "-o",
                    "../aptos/abort-only-contract/auxexch/sources",
                ],
            )
            .disabled(),
        ])
    }

    /// All tasks in declaration order.
    pub fn tasks(&self) -> &[GenerationTask] {
        &self.tasks
    }

    /// Enabled tasks in declaration order.
    pub fn enabled_tasks(&self) -> impl Iterator<Item = &GenerationTask> {
        self.tasks.iter().filter(|t| t.enabled)
    }

    pub fn get(&self, name: &str) -> Option<&GenerationTask> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Opt the named tasks in. Unknown names are an error.
    pub fn enable<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self, GenerateError> {
        for name in names {
            let name = name.as_ref();
            let task = self
                .tasks
                .iter_mut()
                .find(|t| t.name == name)
                .ok_or_else(|| GenerateError::UnknownTask(name.to_string()))?;
            task.enabled = true;
        }
        Ok(self)
    }

    /// Restrict the run to the named tasks, enabling each of them.
    ///
    /// An empty list leaves the table unchanged.
    pub fn only<S: AsRef<str>>(self, names: &[S]) -> Result<Self, GenerateError> {
        if names.is_empty() {
            return Ok(self);
        }
        let wanted: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();
        if let Some(unknown) = wanted.iter().find(|n| self.get(n).is_none()) {
            return Err(GenerateError::UnknownTask(unknown.to_string()));
        }
        let tasks = self
            .tasks
            .into_iter()
            .map(|mut t| {
                t.enabled = wanted.contains(t.name.as_str());
                t
            })
            .collect();
        Ok(Self { tasks })
    }

    /// Collect every invariant violation. Empty means the table is runnable.
    pub fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let mut names = HashSet::new();
        let mut outputs: Vec<(PathBuf, &str)> = Vec::new();

        for (index, task) in self.tasks.iter().enumerate() {
            if task.name.trim().is_empty() {
                violations.push(format!("Task #{} has an empty name", index + 1));
            } else if !names.insert(task.name.as_str()) {
                violations.push(format!("Duplicate task name '{}'", task.name));
            }

            if task.tool.is_empty() {
                violations.push(format!("Task '{}' has an empty tool reference", task.name));
            }

            if !task.enabled {
                continue;
            }
            let Some(output) = task.output_path() else {
                continue;
            };
            let output = normalize_output(&output);
            for (other_output, other) in &outputs {
                if *other_output == output {
                    violations.push(format!(
                        "Tasks '{}' and '{}' both write {}",
                        other,
                        task.name,
                        output.display()
                    ));
                } else if output.starts_with(other_output) {
                    violations.push(format!(
                        "Task '{}' writes {} inside the output of task '{}'",
                        task.name,
                        output.display(),
                        other
                    ));
                } else if other_output.starts_with(&output) {
                    violations.push(format!(
                        "Task '{}' writes {} inside the output of task '{}'",
                        other,
                        other_output.display(),
                        task.name
                    ));
                }
            }
            outputs.push((output, task.name.as_str()));
        }

        violations
    }

    /// Validate the table, returning all violations at once.
    pub fn validate(&self) -> Result<(), GenerateError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(GenerateError::InvalidTable(violations))
        }
    }
}

/// Lexically normalise an output path: `.` segments are dropped and `dir/..` pairs
/// folded, so aliases of one file compare equal. Leading `..` segments are kept.
fn normalize_output(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

impl Default for DirectiveTable {
    fn default() -> Self {
        Self::builtin()
    }
}
