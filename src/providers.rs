//! Shared provider traits for dependency injection.
//!
//! Both the CLI help lookup and the executor spawn processes. They share the
//! [`ProcessRunner`] abstraction so either can be tested with a mock runner
//! that never touches the host.

use anyhow::Result;
use std::process::{Command, Output};

/// Trait for running system processes.
pub trait ProcessRunner: Send + Sync {
    /// Runs `program` with `args` to completion, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if the process could not be launched.
    fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Checks if a program exists in PATH.
    fn program_exists(&self, program: &str) -> bool;
}

/// Default process runner using `std::process::Command`.
///
/// # Example
///
/// ```
/// use podman_ai::providers::{ProcessRunner, SystemProcessRunner};
///
/// let output = SystemProcessRunner.run("sh", &["-c", "echo hi"])?;
/// assert_eq!(String::from_utf8_lossy(&output.stdout), "hi\n");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        Ok(cmd.output()?)
    }

    fn program_exists(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
