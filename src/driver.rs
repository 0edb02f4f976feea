//! Generation driver
//!
//! Runs the enabled directives of a table: builds each tool invocation, checks the
//! output location, spawns the tools with bounded concurrency, and fails the whole
//! run on the first error. No retries, no rollback.

mod invocation;
mod report;
mod runner;

pub use invocation::ToolInvocation;
pub use report::{RunReport, TaskOutcome};
pub use runner::{Driver, DriverSettings, VerifyReport};
