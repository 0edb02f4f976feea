//! Concrete process invocations built from generation tasks.

use crate::types::GenerationTask;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// Process command for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInvocation {
    pub task: String,
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    /// Declared output, relative to `working_dir`
    pub output: Option<PathBuf>,
}

impl ToolInvocation {
    /// `launcher[0] launcher[1..] <tool> <task args>`; with no launcher the tool is the program.
    pub fn for_task(task: &GenerationTask, launcher: &[String], working_dir: &Path) -> Self {
        let tool = task.tool.spec();
        let (program, mut args) = match launcher.split_first() {
            Some((program, rest)) => {
                let mut args = rest.to_vec();
                args.push(tool);
                (program.clone(), args)
            }
            None => (tool, Vec::new()),
        };
        args.extend(task.args.iter().cloned());

        Self {
            task: task.name.clone(),
            program,
            args,
            working_dir: working_dir.to_path_buf(),
            output: task.output_path(),
        }
    }

    /// Output path resolved against the working directory.
    pub fn resolved_output(&self) -> Option<PathBuf> {
        self.output.as_ref().map(|p| self.working_dir.join(p))
    }

    /// Shell-quoted rendering for logs and dry runs.
    ///
    /// Arguments holding a NUL byte cannot be quoted and are joined as-is.
    pub fn command_line(&self) -> String {
        let words =
            std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        shlex::try_join(words.clone()).unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "))
    }

    pub(crate) fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}
