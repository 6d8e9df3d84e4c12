use anyhow::{Context, Result, bail};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_RISKY_COMMANDS: &[&str] = &["rm", "rmi", "stop", "kill", "prune", "uninstall"];

/// Project-local configuration file, relative to the working directory.
const LOCAL_CONFIG_FILE: &str = "config/ollama_config.toml";

const CONFIG_PATH_ENV: &str = "PODMAN_AI_CONFIG";
const OLLAMA_URL_ENV: &str = "PODMAN_AI_OLLAMA_URL";
const MODEL_ENV: &str = "PODMAN_AI_MODEL";
const USE_MOCK_ENV: &str = "PODMAN_AI_USE_MOCK";

/// Connection settings for the Ollama generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaSettings {
    pub url: String,
    pub model: String,
}

/// Settings for the risk gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSettings {
    pub risky_commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub ollama: OllamaSettings,
    pub podman_ai: RiskSettings,
    #[serde(default)]
    pub use_mock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama: OllamaSettings {
                url: DEFAULT_OLLAMA_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
            },
            podman_ai: RiskSettings {
                risky_commands: DEFAULT_RISKY_COMMANDS.iter().map(|s| s.to_string()).collect(),
            },
            use_mock: false,
        }
    }
}

impl Config {
    /// Load configuration from the first configuration file found, falling back
    /// to defaults when there is none. Environment variables override both.
    ///
    /// A file that exists but cannot be parsed, or lacks a required key, is an error.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(explicit_path);

        let mut config = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            info!("Config file {} not found, using defaults", path.display());
            eprintln!("Warning: {} not found. Using default settings.", path.display());
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid {} format", path.display()))?;
        info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML configuration document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.ollama.url.trim().is_empty() {
            bail!("Missing key: ollama.url must not be empty");
        }
        if self.ollama.model.trim().is_empty() {
            bail!("Missing key: ollama.model must not be empty");
        }
        Ok(())
    }

    /// Apply environment overrides. `lookup` maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(OLLAMA_URL_ENV).filter(|v| !v.trim().is_empty()) {
            info!("Ollama URL overridden by {}", OLLAMA_URL_ENV);
            self.ollama.url = url;
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.trim().is_empty()) {
            info!("Model overridden by {}", MODEL_ENV);
            self.ollama.model = model;
        }
        if lookup(USE_MOCK_ENV).is_some() {
            self.use_mock = true;
        }
    }

    pub fn is_mock_mode(&self) -> bool {
        self.use_mock
    }

    /// Resolve which configuration file to use. When none of the candidates
    /// exist the first candidate is returned so it can be reported.
    pub fn resolve_path(explicit_path: Option<&Path>) -> PathBuf {
        let candidates = Self::candidate_paths(
            explicit_path,
            std::env::var(CONFIG_PATH_ENV).ok(),
            home_dir(),
        );
        Self::first_existing(&candidates)
    }

    fn candidate_paths(
        explicit_path: Option<&Path>,
        env_path: Option<String>,
        home: Option<PathBuf>,
    ) -> Vec<PathBuf> {
        // An explicit choice is never second-guessed by the fallbacks.
        if let Some(path) = explicit_path {
            return vec![path.to_path_buf()];
        }
        if let Some(path) = env_path.filter(|p| !p.trim().is_empty()) {
            return vec![PathBuf::from(path)];
        }

        let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(home) = home {
            candidates.push(home.join(".podman-ai").join("config.toml"));
        }
        candidates
    }

    fn first_existing(candidates: &[PathBuf]) -> PathBuf {
        candidates
            .iter()
            .find(|p| p.exists())
            .or_else(|| candidates.first())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    pub fn show_config_info(explicit_path: Option<&Path>) -> Result<()> {
        let config_path = Self::resolve_path(explicit_path);
        println!("Configuration file: {}", config_path.display());

        let mut config = if config_path.exists() {
            println!("Status: Found");
            Self::load_from_file(&config_path)?
        } else {
            println!("Status: Not found (using defaults)");
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());

        println!("Ollama URL: {}", config.ollama.url);
        println!("Model: {}", config.ollama.model);
        println!("Risky commands: {}", config.podman_ai.risky_commands.join(", "));
        println!("Mock mode: {}", config.use_mock);

        println!("\nEnvironment overrides:");
        println!("  {}, {}, {}, {}", CONFIG_PATH_ENV, OLLAMA_URL_ENV, MODEL_ENV, USE_MOCK_ENV);

        Ok(())
    }
}
