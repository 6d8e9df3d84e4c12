use crate::config::OllamaSettings;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::prompt::{has_help_context, request_from_prompt};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

/// Prefix of the text returned in place of a command when the backend
/// could not be queried.
pub const QUERY_ERROR_PREFIX: &str = "Error querying Ollama:";

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: Option<String>,
}

/// Single-shot text generation for a prompt.
///
/// Implementations never fail: transport problems come back as a
/// human-readable message, which the validator then rejects like any other
/// unusable output.
#[async_trait]
pub trait CommandGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> String;
}

/// Generator backed by an Ollama `/api/generate` endpoint.
pub struct OllamaGenerator {
    client: Box<dyn HttpClient>,
    settings: OllamaSettings,
}

impl OllamaGenerator {
    pub fn new(settings: OllamaSettings) -> Self {
        Self::with_client(settings, Box::new(ReqwestHttpClient::new()))
    }

    /// Creates a generator with a custom HTTP client (for testing).
    pub fn with_client(settings: OllamaSettings, client: Box<dyn HttpClient>) -> Self {
        Self { client, settings }
    }

    async fn query(&self, prompt: &str) -> Result<String> {
        let request_body = json!({
            "model": self.settings.model,
            "prompt": prompt,
            "stream": false
        });

        debug!("Sending {} byte prompt to {}", prompt.len(), self.settings.url);
        let response = self.client.post_json(&self.settings.url, &request_body).await?;

        if !response.is_success() {
            return Err(anyhow!(
                "HTTP status {} from {}: {}",
                response.status,
                self.settings.url,
                response.body.trim()
            ));
        }

        debug!("Ollama response: {}", response.body);
        let parsed: OllamaResponse =
            serde_json::from_str(&response.body).context("malformed response body")?;

        Ok(parsed.response.unwrap_or_default().trim().to_string())
    }
}

#[async_trait]
impl CommandGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> String {
        info!("Querying model '{}'", self.settings.model);
        match self.query(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Generation request failed: {:#}", e);
                format!("{} {:#}", QUERY_ERROR_PREFIX, e)
            }
        }
    }
}

/// Deterministic generator for running without a model server.
///
/// Answers from keywords in the request embedded in the prompt.
pub struct MockGenerator;

impl MockGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn mock_generate(&self, prompt: &str) -> String {
        let request = request_from_prompt(prompt).unwrap_or_default().to_lowercase();

        let reply = if request.contains("alpine") {
            "podman run -it alpine /bin/sh"
        } else if request.contains("remove") {
            "podman rm -a"
        } else if request.contains("list") {
            "podman ps -a"
        } else if request.contains("network") {
            // Only answers properly once it has seen the CLI help.
            if has_help_context(prompt) {
                "podman network ls"
            } else {
                "Sure! To see networks you can run:\npodman network ls"
            }
        } else {
            "I cannot help with that"
        };

        reply.to_string()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> String {
        info!("Using mock generator");
        self.mock_generate(prompt)
    }
}
