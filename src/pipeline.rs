use crate::cli_help::{HelpProvider, PodmanHelp};
use crate::config::Config;
use crate::executor::{ExecutionOutcome, Executor};
use crate::exit_codes;
use crate::llm_generator::{CommandGenerator, MockGenerator, OllamaGenerator};
use crate::retry::{GenerationOutcome, RetryOrchestrator};
use crate::risk_gate::{ConsoleConfirmer, Confirmer, RiskGate};
use anyhow::{Result, bail};
use std::io::{self, Write};
use tracing::info;

/// How a request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The command was run; it may still have failed.
    Executed(ExecutionOutcome),
    /// The operator declined a risky command.
    Cancelled,
    /// No valid command after the retry.
    GenerationFailed { last_output: String },
}

impl PipelineOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineOutcome::Executed(_) | PipelineOutcome::Cancelled => exit_codes::OK,
            PipelineOutcome::GenerationFailed { .. } => exit_codes::FAILED,
        }
    }
}

/// Request to command to (confirmed) execution, for a single request.
pub struct Pipeline {
    generator: Box<dyn CommandGenerator>,
    help: Box<dyn HelpProvider>,
    risk_gate: RiskGate,
    confirmer: Box<dyn Confirmer>,
    executor: Executor,
}

impl Pipeline {
    /// Wires the production collaborators from `config`.
    pub fn from_config(config: &Config) -> Self {
        let generator: Box<dyn CommandGenerator> = if config.is_mock_mode() {
            info!("Mock mode enabled, no model server will be contacted");
            Box::new(MockGenerator::new())
        } else {
            Box::new(OllamaGenerator::new(config.ollama.clone()))
        };

        Self::new(
            generator,
            Box::new(PodmanHelp::new()),
            RiskGate::new(config.podman_ai.risky_commands.clone()),
            Box::new(ConsoleConfirmer),
            Executor::new(),
        )
    }

    pub fn new(
        generator: Box<dyn CommandGenerator>,
        help: Box<dyn HelpProvider>,
        risk_gate: RiskGate,
        confirmer: Box<dyn Confirmer>,
        executor: Executor,
    ) -> Self {
        Self {
            generator,
            help,
            risk_gate,
            confirmer,
            executor,
        }
    }

    /// Processes `request`, writing operator messages to stdout.
    pub async fn process_request(&self, request: &str) -> Result<PipelineOutcome> {
        let mut output = io::stdout();
        self.process_request_with_io(request, &mut output).await
    }

    /// Processes `request`, writing operator messages to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty request or when the console cannot be
    /// written to or read from. Generation and execution problems are part of
    /// the returned [`PipelineOutcome`].
    pub async fn process_request_with_io<W: Write>(
        &self,
        request: &str,
        output: &mut W,
    ) -> Result<PipelineOutcome> {
        let request = request.trim();
        if request.is_empty() {
            bail!("Request must not be empty");
        }

        writeln!(output, "🔍 User query: {}", request)?;

        let orchestrator = RetryOrchestrator::new(self.generator.as_ref(), self.help.as_ref());
        let command = match orchestrator.generate(request, &mut *output).await? {
            GenerationOutcome::Generated { command, attempts } => {
                info!("Generated command after {} attempt(s): {}", attempts, command);
                command
            }
            GenerationOutcome::Failed { last_output, attempts } => {
                info!("No valid command after {} attempts", attempts);
                writeln!(output, "❌ Failed to generate a valid Podman command after retry.")?;
                writeln!(output, "Consider reviewing your query or checking Podman documentation.")?;
                return Ok(PipelineOutcome::GenerationFailed { last_output });
            }
        };

        writeln!(output, "🤖 Ollama generated: {}", command)?;
        output.flush()?;

        if !self.risk_gate.allows(&command, self.confirmer.as_ref())? {
            writeln!(output, "Operation cancelled.")?;
            return Ok(PipelineOutcome::Cancelled);
        }

        let outcome = self.executor.execute(&command);
        writeln!(output, "✅ Command output:\n{}", outcome.report())?;
        Ok(PipelineOutcome::Executed(outcome))
    }
}
