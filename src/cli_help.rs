//! Retrieval of the container runtime's own help text.
//!
//! The help output is fetched fresh each time it is needed; nothing is cached.

use crate::providers::{ProcessRunner, SystemProcessRunner};
use crate::validator::TARGET_CLI;
use tracing::{debug, info};

/// Prefix of the text returned when the help could not be retrieved.
pub const HELP_ERROR_PREFIX: &str = "Could not retrieve podman help:";

/// Source of CLI help text used to enrich a retry prompt.
pub trait HelpProvider: Send + Sync {
    /// Returns the help text, or a description of why it is unavailable.
    fn fetch_help(&self) -> String;
}

/// Runs `podman help` and returns its standard output.
pub struct PodmanHelp {
    runner: Box<dyn ProcessRunner>,
}

impl PodmanHelp {
    pub fn new() -> Self {
        Self::with_runner(Box::new(SystemProcessRunner))
    }

    /// Creates a help provider with a custom process runner (for testing).
    pub fn with_runner(runner: Box<dyn ProcessRunner>) -> Self {
        Self { runner }
    }
}

impl Default for PodmanHelp {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpProvider for PodmanHelp {
    fn fetch_help(&self) -> String {
        if !self.runner.program_exists(TARGET_CLI) {
            info!("{} not found in PATH", TARGET_CLI);
            return format!("{} {} not found in PATH", HELP_ERROR_PREFIX, TARGET_CLI);
        }

        match self.runner.run(TARGET_CLI, &["help"]) {
            Ok(output) => {
                // stdout is used as-is, whatever the exit status.
                let help = String::from_utf8_lossy(&output.stdout).to_string();
                debug!("Retrieved {} bytes of {} help", help.len(), TARGET_CLI);
                help
            }
            Err(e) => {
                info!("Failed to run {} help: {:#}", TARGET_CLI, e);
                format!("{} {:#}", HELP_ERROR_PREFIX, e)
            }
        }
    }
}
