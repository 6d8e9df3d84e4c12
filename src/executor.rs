//! Command execution for validated, confirmed commands.
//!
//! Commands are handed whole to `sh -c`. This is the only place the tool
//! changes anything on the host.

use crate::providers::{ProcessRunner, SystemProcessRunner};
use std::process::Output;
use tracing::{error, info};

/// Result of running a command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    /// The command exited with status zero.
    Succeeded { stdout: String, stderr: String },
    /// The command ran but exited non-zero (or was killed by a signal).
    Failed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The shell could not be started at all.
    LaunchFailed { reason: String },
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Succeeded { .. })
    }

    /// Text shown to the operator: stdout on success, otherwise an error message.
    pub fn report(&self) -> String {
        match self {
            ExecutionOutcome::Succeeded { stdout, .. } => stdout.clone(),
            ExecutionOutcome::Failed { stderr, .. } => format!("❌ Error: {}", stderr),
            ExecutionOutcome::LaunchFailed { reason } => {
                format!("Error executing command: {}", reason)
            }
        }
    }

    fn from_output(output: &Output) -> Self {
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            ExecutionOutcome::Succeeded { stdout, stderr }
        } else {
            ExecutionOutcome::Failed {
                exit_code: output.status.code(),
                stdout,
                stderr,
            }
        }
    }
}

/// Runs generated commands through the shell.
///
/// # Example
///
/// ```no_run
/// use podman_ai::executor::Executor;
///
/// let outcome = Executor::new().execute("podman ps -a");
/// println!("{}", outcome.report());
/// ```
pub struct Executor {
    runner: Box<dyn ProcessRunner>,
}

impl Executor {
    pub fn new() -> Self {
        Self::with_runner(Box::new(SystemProcessRunner))
    }

    /// Creates an executor with a custom process runner (for testing).
    pub fn with_runner(runner: Box<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    /// Runs `command` with `sh -c`, capturing its output and exit status.
    pub fn execute(&self, command: &str) -> ExecutionOutcome {
        info!("Executing command: {}", command);

        match self.runner.run("sh", &["-c", command]) {
            Ok(output) => {
                let outcome = ExecutionOutcome::from_output(&output);
                if !outcome.is_success() {
                    error!("Command failed with status: {}", output.status);
                }
                outcome
            }
            Err(e) => {
                error!("Failed to launch command: {:#}", e);
                ExecutionOutcome::LaunchFailed {
                    reason: format!("{:#}", e),
                }
            }
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}
