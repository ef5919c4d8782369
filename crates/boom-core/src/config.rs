//! Configuration management for the boom report service

use serde::{Deserialize, Serialize};
use crate::backoff::{BackoffPolicy, RetryTrigger};
use crate::error::{BoomError, Result};
use std::path::Path;
use std::time::Duration;

pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_AIRTABLE_API_KEY: &str = "AIRTABLE_API_KEY";
pub const ENV_AIRTABLE_BASE_ID: &str = "AIRTABLE_BASE_ID";
pub const ENV_AIRTABLE_TABLE_ID: &str = "AIRTABLE_TABLE_ID";

/// Main configuration structure
///
/// Built once per process and handed to the request handler. Secrets may be
/// empty here; [`BoomConfig::validate`] is what turns their absence into an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoomConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub airtable: AirtableConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default, alias = "token")]
    pub api_key: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    #[serde(default = "default_gemini_base_url", alias = "url")]
    pub base_url: String,

    /// Attach the search tool directive to generation requests
    #[serde(default)]
    pub search_grounding: bool,

    /// Substitute fixed text instead of failing when no text comes back
    #[serde(default)]
    pub fallback_on_empty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirtableConfig {
    #[serde(default, alias = "token")]  // Accept both 'api_key' and 'token'
    pub api_key: String,

    #[serde(default)]
    pub base_id: String,

    #[serde(default)]
    pub table_id: String,

    #[serde(default = "default_airtable_base_url", alias = "url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default)]
    pub trigger: RetryTrigger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

// Default functions
fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_airtable_base_url() -> String {
    "https://api.airtable.com".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8888
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
            search_grounding: false,
            fallback_on_empty: false,
        }
    }
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_id: String::new(),
            table_id: String::new(),
            base_url: default_airtable_base_url(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            trigger: RetryTrigger::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> BackoffPolicy {
        BackoffPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
            trigger: self.trigger,
        }
    }
}

impl BoomConfig {
    /// Load secrets from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load secrets through an arbitrary lookup, so callers never have to touch
    /// the real environment
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).unwrap_or_default();

        let mut config = Self::default();
        config.gemini.api_key = read(ENV_GEMINI_API_KEY);
        if let Some(model) = lookup(ENV_GEMINI_MODEL).filter(|m| !m.trim().is_empty()) {
            config.gemini.model = model.trim().to_string();
        }
        config.airtable.api_key = read(ENV_AIRTABLE_API_KEY);
        config.airtable.base_id = read(ENV_AIRTABLE_BASE_ID);
        config.airtable.table_id = read(ENV_AIRTABLE_TABLE_ID);
        config
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| BoomError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Environment variable names of the secrets that are not set
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        [
            (ENV_GEMINI_API_KEY, &self.gemini.api_key),
            (ENV_AIRTABLE_API_KEY, &self.airtable.api_key),
            (ENV_AIRTABLE_BASE_ID, &self.airtable.base_id),
            (ENV_AIRTABLE_TABLE_ID, &self.airtable.table_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_secrets();
        if !missing.is_empty() {
            return Err(BoomError::Config(format!(
                "{} is required",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}
