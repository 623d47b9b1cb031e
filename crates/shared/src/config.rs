//! Configuration management for Nimubot.
//!
//! Settings are loaded from a TOML file with sensible defaults for every
//! section. Channel credentials and the listen port can be overridden from the
//! environment (or a `.env` file), which is how they are usually supplied.

use crate::Result;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the LINE channel access token
pub const ENV_CHANNEL_ACCESS_TOKEN: &str = "CHANNEL_ACCESS_TOKEN";
/// Environment variable holding the LINE channel secret
pub const ENV_CHANNEL_SECRET: &str = "CHANNEL_SECRET";
/// Environment variable overriding the listen port
pub const ENV_PORT: &str = "PORT";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Webhook server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// LINE Messaging API settings
    #[serde(default)]
    pub line: LineConfig,

    /// Jikan catalog API settings
    #[serde(default)]
    pub jikan: JikanConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Webhook server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

/// LINE Messaging API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Long-lived channel access token
    pub channel_access_token: String,

    /// Channel secret used to verify webhook signatures
    pub channel_secret: String,

    /// Messaging API base URL
    pub api_base_url: String,

    /// Reject webhook calls without a valid `X-Line-Signature`
    pub verify_signature: bool,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Jikan API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JikanConfig {
    /// Jikan API base URL
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_access_token: String::new(),
            channel_secret: String::new(),
            api_base_url: "https://api.line.me".to_string(),
            verify_signature: true,
            timeout_secs: 30,
        }
    }
}

impl Default for JikanConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jikan.moe/v4".to_string(),
            timeout_secs: 30,
            user_agent: "Nimubot/0.1.0".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "info".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!(path = %env_file.display(), "Loaded .env file");
        }

        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_CHANNEL_ACCESS_TOKEN) {
            self.line.channel_access_token = token;
        }
        if let Some(secret) = lookup(ENV_CHANNEL_SECRET) {
            self.line.channel_secret = secret;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value: {}", ENV_PORT, port))?;
        }
        Ok(())
    }

    /// Check that the settings needed to talk to LINE are present
    pub fn validate(&self) -> Result<()> {
        if self.line.channel_access_token.trim().is_empty() {
            bail!(
                "LINE channel access token is empty (set line.channel_access_token or {})",
                ENV_CHANNEL_ACCESS_TOKEN
            );
        }
        if self.line.verify_signature && self.line.channel_secret.trim().is_empty() {
            bail!(
                "LINE channel secret is empty while signature verification is enabled (set line.channel_secret or {})",
                ENV_CHANNEL_SECRET
            );
        }
        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Socket address string the webhook server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
