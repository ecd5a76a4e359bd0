//! Configuration management for StudyScout
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! The service credential is read from the environment here, once; its
//! absence is a normal state that puts the gateway in offline mode.

use crate::error::{Result, StudyScoutError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variables consulted for the API key, in priority order
pub const API_KEY_ENV_VARS: [&str; 3] = ["STUDYSCOUT_API_KEY", "GEMINI_API_KEY", "API_KEY"];

/// Main configuration structure for StudyScout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generative service settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Fallback timing settings
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; never written back out when the config is serialized
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Model to use for all requests
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (useful for tests and local mocks)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// HTTP client timeout for a single request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Gateway timing configuration
///
/// The simulated delays keep perceived loading consistent between the live
/// and offline paths. Tests set both to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Delay before offline resource and summary results are returned
    #[serde(default = "default_simulated_latency")]
    pub simulated_latency_ms: u64,

    /// Delay before the demo-mode chat reply is returned
    #[serde(default = "default_demo_reply_delay")]
    pub demo_reply_delay_ms: u64,
}

fn default_simulated_latency() -> u64 {
    1500
}

fn default_demo_reply_delay() -> u64 {
    1000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_simulated_latency(),
            demo_reply_delay_ms: default_demo_reply_delay(),
        }
    }
}

impl GatewayConfig {
    /// Settings with every simulated delay disabled
    pub fn immediate() -> Self {
        Self {
            simulated_latency_ms: 0,
            demo_reply_delay_ms: 0,
        }
    }

    /// Simulated latency as a `Duration`
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Demo reply delay as a `Duration`
    pub fn demo_reply_delay(&self) -> Duration {
        Duration::from_millis(self.demo_reply_delay_ms)
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(StudyScoutError::Io)?;
        let config: Self = serde_yaml::from_str(&contents).map_err(StudyScoutError::Yaml)?;
        tracing::debug!("Loaded configuration from {}", path);
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Some(key) = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
        {
            self.provider.gemini.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("STUDYSCOUT_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("STUDYSCOUT_API_BASE") {
            self.provider.gemini.api_base = api_base;
        }

        if let Ok(timeout) = std::env::var("STUDYSCOUT_REQUEST_TIMEOUT_SECS") {
            if let Ok(value) = timeout.parse() {
                self.provider.gemini.request_timeout_secs = value;
            } else {
                tracing::warn!("Invalid STUDYSCOUT_REQUEST_TIMEOUT_SECS: {}", timeout);
            }
        }

        if let Ok(latency) = std::env::var("STUDYSCOUT_SIMULATED_LATENCY_MS") {
            if let Ok(value) = latency.parse() {
                self.gateway.simulated_latency_ms = value;
            } else {
                tracing::warn!("Invalid STUDYSCOUT_SIMULATED_LATENCY_MS: {}", latency);
            }
        }

        if let Ok(delay) = std::env::var("STUDYSCOUT_DEMO_REPLY_DELAY_MS") {
            if let Ok(value) = delay.parse() {
                self.gateway.demo_reply_delay_ms = value;
            } else {
                tracing::warn!("Invalid STUDYSCOUT_DEMO_REPLY_DELAY_MS: {}", delay);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(model) = &cli.model {
            self.provider.gemini.model = model.clone();
        }
        if cli.offline {
            tracing::debug!("Offline mode requested, ignoring configured API key");
            self.provider.gemini.api_key = None;
        }
    }

    /// Returns true if an API key is configured
    pub fn has_credentials(&self) -> bool {
        self.provider
            .gemini
            .api_key
            .as_deref()
            .map_or(false, |k| !k.trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let gemini = &self.provider.gemini;

        if gemini.model.trim().is_empty() {
            return Err(
                StudyScoutError::Config("provider.gemini.model cannot be empty".to_string()).into(),
            );
        }

        if gemini.api_base.trim().is_empty() {
            return Err(StudyScoutError::Config(
                "provider.gemini.api_base cannot be empty".to_string(),
            )
            .into());
        }

        if !gemini.api_base.starts_with("http://") && !gemini.api_base.starts_with("https://") {
            return Err(StudyScoutError::Config(format!(
                "provider.gemini.api_base must be an http(s) URL: {}",
                gemini.api_base
            ))
            .into());
        }

        if gemini.request_timeout_secs == 0 {
            return Err(StudyScoutError::Config(
                "provider.gemini.request_timeout_secs must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
