//! podman-ai - plain language to podman commands.
//!
//! This library turns a natural-language request into a single `podman`
//! command using a locally hosted Ollama model, then runs it after a safety
//! check:
//!
//! - **Prompt building** with a worked example and optional CLI help context
//! - **Validation** of the generated text's shape
//! - **One retry** with `podman help` output when the first answer is unusable
//! - **Confirmation** before commands that match a risky keyword
//! - **Execution** through the shell with captured output
//!
//! # Architecture
//!
//! - [`config`] - Backend URL, model and risky keywords (TOML + env overrides)
//! - [`prompt`] - Prompt construction
//! - [`validator`] - Syntactic check of generated commands
//! - [`http_client`] - HTTP client abstraction
//! - [`llm_generator`] - Single-shot generation against Ollama (plus a mock)
//! - [`cli_help`] - `podman help` retrieval
//! - [`retry`] - Bounded generation with one help-enriched retry
//! - [`risk_gate`] - Risk classification and operator confirmation
//! - [`executor`] - Shell execution with a tagged outcome
//! - [`pipeline`] - Wires everything together for one request
//! - [`providers`] - Shared process runner trait
//! - [`exit_codes`] - Stable process exit codes
//!
//! # Example
//!
//! ```ignore
//! use podman_ai::config::Config;
//! use podman_ai::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     let pipeline = Pipeline::from_config(&config);
//!
//!     let outcome = pipeline.process_request("list all containers").await?;
//!     std::process::exit(outcome.exit_code().into());
//! }
//! ```

pub mod cli_help;
pub mod config;
pub mod executor;
pub mod exit_codes;
pub mod http_client;
pub mod llm_generator;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod retry;
pub mod risk_gate;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;
