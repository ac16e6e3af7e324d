//! Configuration management for pitchd.
//!
//! Layers, later wins: built-in defaults, an optional TOML file, then
//! environment variables (`GROQ_API_KEY`, `PORT`, ...).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// System-wide config file, read when present
pub const CONFIG_PATH: &str = "/etc/pitchd/config.toml";

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "PITCHD_CONFIG";

pub const API_KEY_ENV: &str = "GROQ_API_KEY";
pub const PORT_ENV: &str = "PORT";
pub const HOST_ENV: &str = "PITCHD_HOST";
pub const MODEL_ENV: &str = "PITCHD_MODEL";
pub const API_BASE_ENV: &str = "PITCHD_API_BASE";

/// Listening socket configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Chat-completions provider and sampling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer key. Usually supplied through `GROQ_API_KEY` rather than the file.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sampling for the prospect's in-character reply
    #[serde(default = "default_reply_temperature")]
    pub reply_temperature: f32,

    #[serde(default = "default_reply_max_tokens")]
    pub reply_max_tokens: u32,

    /// Sampling for the grader; low temperature keeps the JSON stable
    #[serde(default = "default_evaluation_temperature")]
    pub evaluation_temperature: f32,

    #[serde(default = "default_evaluation_max_tokens")]
    pub evaluation_max_tokens: u32,

    /// Per-call HTTP timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama-3.1-70b-versatile".to_string()
}

fn default_reply_temperature() -> f32 {
    0.7
}

fn default_reply_max_tokens() -> u32 {
    200
}

fn default_evaluation_temperature() -> f32 {
    0.3
}

fn default_evaluation_max_tokens() -> u32 {
    500
}

fn default_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_key: None,
            reply_temperature: default_reply_temperature(),
            reply_max_tokens: default_reply_max_tokens(),
            evaluation_temperature: default_evaluation_temperature(),
            evaluation_max_tokens: default_evaluation_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Complete pitchd configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,
}

impl PitchConfig {
    /// Load configuration from file (if any) and the process environment.
    ///
    /// An explicit path must exist. Without one, `PITCHD_CONFIG` is tried,
    /// then `CONFIG_PATH`; if neither is present defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(|| {
                let system = PathBuf::from(CONFIG_PATH);
                system.exists().then_some(system)
            });

        let mut config = match path {
            Some(path) => Self::load_from_path(&path)?,
            None => {
                info!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load config from a specific TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: PitchConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// Empty values are ignored. A `PORT` that is not a valid port number is
    /// an error rather than a silent fallback.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(API_KEY_ENV) {
            self.llm.api_key = Some(key);
        }
        if let Some(port) = get(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value '{}'", PORT_ENV, port))?;
        }
        if let Some(host) = get(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(model) = get(MODEL_ENV) {
            self.llm.model = model;
        }
        if let Some(base) = get(API_BASE_ENV) {
            self.llm.api_base = base;
        }

        if self.llm.api_key.is_none() {
            warn!(
                "{} is not set; /api/generate-response will fail until it is",
                API_KEY_ENV
            );
        }
        Ok(())
    }

    /// `host:port` for the listening socket
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
