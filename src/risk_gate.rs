//! Risk classification and operator confirmation.
//!
//! Commands containing a configured risky keyword are only run after the
//! operator explicitly answers `yes`.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::info;

/// The only answer that confirms a risky command (case-insensitive).
pub const AFFIRMATIVE: &str = "yes";

/// Capability to ask the operator whether a risky command may run.
pub trait Confirmer: Send + Sync {
    /// Returns true only if the operator approved `command`.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be written.
    fn confirm(&self, command: &str) -> Result<bool>;
}

/// Returns true if `answer` is the affirmative token, ignoring case and
/// surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(AFFIRMATIVE)
}

/// Classifies commands against a set of risky keywords.
///
/// # Example
///
/// ```
/// use podman_ai::risk_gate::RiskGate;
///
/// let gate = RiskGate::new(vec!["rm".to_string(), "prune".to_string()]);
/// assert!(gate.is_risky("podman rm -a"));
/// assert!(!gate.is_risky("podman ps"));
/// ```
#[derive(Debug, Clone)]
pub struct RiskGate {
    keywords: Vec<String>,
}

impl RiskGate {
    pub fn new(keywords: Vec<String>) -> Self {
        // An empty keyword would match every command.
        let keywords = keywords.into_iter().filter(|k| !k.is_empty()).collect();
        Self { keywords }
    }

    /// First configured keyword occurring anywhere in `command`.
    pub fn matched_keyword(&self, command: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|keyword| command.contains(keyword.as_str()))
            .map(String::as_str)
    }

    pub fn is_risky(&self, command: &str) -> bool {
        self.matched_keyword(command).is_some()
    }

    /// Decides whether `command` may run. Safe commands pass without asking;
    /// risky ones go through `confirmer`.
    pub fn allows(&self, command: &str, confirmer: &dyn Confirmer) -> Result<bool> {
        match self.matched_keyword(command) {
            None => Ok(true),
            Some(keyword) => {
                info!("Command matched risky keyword '{}'", keyword);
                confirmer.confirm(command)
            }
        }
    }
}

/// Asks for confirmation on the terminal.
pub struct ConsoleConfirmer;

impl ConsoleConfirmer {
    /// Prompts for confirmation using custom I/O streams.
    ///
    /// End of input and answers that are not valid UTF-8 count as a refusal.
    pub fn confirm_with_io<R: BufRead, W: Write>(
        &self,
        command: &str,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool> {
        writeln!(output, "⚠️ Risky command detected: {}", command)?;
        write!(output, "Do you want to proceed? (yes/no): ")?;
        output.flush()?;

        let mut answer = Vec::new();
        input.read_until(b'\n', &mut answer)?;

        // Undecodable bytes can never spell "yes".
        let approved = is_affirmative(&String::from_utf8_lossy(&answer));
        info!("Operator {} risky command", if approved { "approved" } else { "declined" });
        Ok(approved)
    }
}

impl Confirmer for ConsoleConfirmer {
    fn confirm(&self, command: &str) -> Result<bool> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        self.confirm_with_io(command, &mut input, &mut output)
    }
}
