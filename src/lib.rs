//! auxgen: code generation directives for the aux Move contracts
//!
//! Declares the generator invocations that produce the critbit containers and the
//! reward distributor modules, and drives them: list, validate, run, and verify that
//! repeated runs are byte-for-byte idempotent.

pub mod cli;
pub mod config;
pub mod digest;
pub mod directives;
pub mod driver;
pub mod error;
pub mod logging;
pub mod types;
