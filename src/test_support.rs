//! Test-only doubles for the pipeline's injected collaborators.

use crate::cli_help::HelpProvider;
use crate::llm_generator::CommandGenerator;
use crate::providers::ProcessRunner;
use crate::risk_gate::Confirmer;
use anyhow::Result;
use async_trait::async_trait;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Generator that replays scripted replies in order and records every prompt.
/// Once the script runs out it returns an empty string.
pub struct ScriptedGenerator {
    replies: Mutex<Vec<String>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGenerator {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().rev().map(|r| r.to_string()).collect()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns `reply` for more attempts than any request may make.
    pub fn always(reply: &str) -> Self {
        Self::new(&[reply; 8])
    }

    /// Shared handle on the recorded prompts, usable after the generator is boxed.
    pub fn prompt_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> String {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies.lock().unwrap().pop().unwrap_or_default()
    }
}

/// Help provider returning fixed text and counting calls.
pub struct StaticHelp {
    text: String,
    calls: Arc<AtomicUsize>,
}

impl StaticHelp {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HelpProvider for StaticHelp {
    fn fetch_help(&self) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.text.clone()
    }
}

/// Confirmer with a fixed answer that records what it was asked.
pub struct ScriptedConfirmer {
    answer: bool,
    asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn question_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.asked)
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, command: &str) -> Result<bool> {
        self.asked.lock().unwrap().push(command.to_string());
        Ok(self.answer)
    }
}

/// Process runner that records invocations and returns a canned output.
pub struct RecordingRunner {
    output: Output,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl RecordingRunner {
    pub fn new(code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            output: Output {
                status: ExitStatus::from_raw(code << 8),
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            },
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Each call is recorded as the program followed by its arguments.
    pub fn call_log(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        Arc::clone(&self.calls)
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(|a| a.to_string()));
        self.calls.lock().unwrap().push(call);
        Ok(self.output.clone())
    }

    fn program_exists(&self, _program: &str) -> bool {
        true
    }
}
