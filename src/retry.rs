//! Bounded generation with a single help-enriched retry.
//!
//! The first attempt uses a bare prompt. If its output fails validation, the
//! CLI help is fetched and a second prompt including it is tried. There is no
//! third attempt.

use crate::cli_help::HelpProvider;
use crate::llm_generator::CommandGenerator;
use crate::prompt::build_prompt;
use crate::validator::is_valid_command;
use anyhow::Result;
use std::io::Write;
use tracing::info;

/// Upper bound on generation attempts per request.
pub const MAX_ATTEMPTS: usize = 2;

/// Result of the generation phase.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// A command passed validation.
    Generated { command: String, attempts: usize },
    /// Neither attempt produced a valid command.
    Failed { last_output: String, attempts: usize },
}

impl GenerationOutcome {
    pub fn attempts(&self) -> usize {
        match self {
            GenerationOutcome::Generated { attempts, .. } | GenerationOutcome::Failed { attempts, .. } => {
                *attempts
            }
        }
    }
}

pub struct RetryOrchestrator<'a> {
    generator: &'a dyn CommandGenerator,
    help: &'a dyn HelpProvider,
}

impl<'a> RetryOrchestrator<'a> {
    pub fn new(generator: &'a dyn CommandGenerator, help: &'a dyn HelpProvider) -> Self {
        Self { generator, help }
    }

    /// Generates a command for `request`, retrying once with CLI help.
    ///
    /// Progress notes for the operator go to `output`.
    ///
    /// # Errors
    ///
    /// Only fails if writing to `output` fails; generation problems are
    /// reported through [`GenerationOutcome::Failed`].
    pub async fn generate<W: Write>(&self, request: &str, output: &mut W) -> Result<GenerationOutcome> {
        let first = self.generator.generate(&build_prompt(request, None)).await;
        if is_valid_command(&first) {
            info!("First attempt produced a valid command");
            return Ok(GenerationOutcome::Generated {
                command: first.trim().to_string(),
                attempts: 1,
            });
        }

        info!("First attempt produced an invalid command: {:?}", first);
        writeln!(output, "⚠️ First attempt failed. Trying again with podman help context...")?;

        let help_text = self.help.fetch_help();
        let second = self
            .generator
            .generate(&build_prompt(request, Some(&help_text)))
            .await;

        if is_valid_command(&second) {
            info!("Retry with help context produced a valid command");
            Ok(GenerationOutcome::Generated {
                command: second.trim().to_string(),
                attempts: MAX_ATTEMPTS,
            })
        } else {
            info!("Retry produced an invalid command: {:?}", second);
            Ok(GenerationOutcome::Failed {
                last_output: second,
                attempts: MAX_ATTEMPTS,
            })
        }
    }
}
