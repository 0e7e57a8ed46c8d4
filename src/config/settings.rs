//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Conventional environment variable holding the Gemini credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Prefix for layered environment overrides, e.g. `LEXIFLOW__SERVER__PORT`
pub const ENV_PREFIX: &str = "LEXIFLOW";

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/lexiflow.yaml";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub gemini: GeminiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
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
    8080
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// Gemini API configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// Absent credentials are reported per request, not at startup
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on a single generateContent call; unbounded when unset
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub models: ModelConfig,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("models", &self.models)
            .finish()
    }
}

impl GeminiConfig {
    /// Whether a non-empty credential is available
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().map_or(false, |k| !k.trim().is_empty())
    }
}

/// Model used by each endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default = "default_detect_model")]
    pub detect: String,
    #[serde(default = "default_flash_model")]
    pub generate: String,
    #[serde(default = "default_flash_model")]
    pub summarize: String,
}

fn default_detect_model() -> String {
    "gemini-pro".to_string()
}

fn default_flash_model() -> String {
    "gemini-1.5-flash".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            detect: default_detect_model(),
            generate: default_flash_model(),
            summarize: default_flash_model(),
        }
    }
}

impl Settings {
    /// Load settings from the default file, the environment and `GEMINI_API_KEY`
    pub fn load() -> Result<Self> {
        let settings = Self::load_from_path(DEFAULT_CONFIG_PATH)?;
        Ok(settings.with_credential_fallback(std::env::var(API_KEY_ENV).ok()))
    }

    /// Load settings from a specific file (YAML or TOML by extension) plus environment overrides
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let format = if path.extension().map_or(false, |ext| ext == "toml") {
            FileFormat::Toml
        } else {
            FileFormat::Yaml
        };

        let mut config_builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("gemini.base_url", default_base_url())?
            .set_default("gemini.models.detect", default_detect_model())?
            .set_default("gemini.models.generate", default_flash_model())?
            .set_default("gemini.models.summarize", default_flash_model())?;

        if path.exists() {
            config_builder = config_builder.add_source(File::from(path).format(format));
        }

        config_builder = config_builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = config_builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Fill the credential from `fallback` when no layered source provided one
    pub fn with_credential_fallback(mut self, fallback: Option<String>) -> Self {
        if !self.gemini.has_credential() {
            self.gemini.api_key = fallback.filter(|k| !k.trim().is_empty());
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Server port cannot be 0".to_string(),
            )));
        }

        if self.gemini.timeout_ms == Some(0) {
            return Err(AppError::Config(config::ConfigError::Message(
                "Gemini timeout_ms cannot be 0; omit it for no timeout".to_string(),
            )));
        }

        if !self.gemini.base_url.starts_with("http://")
            && !self.gemini.base_url.starts_with("https://")
        {
            return Err(AppError::Config(config::ConfigError::Message(format!(
                "Gemini base URL must be http(s), got '{}'",
                self.gemini.base_url
            ))));
        }

        let models = &self.gemini.models;
        for (endpoint, model) in [
            ("detect", &models.detect),
            ("generate", &models.generate),
            ("summarize", &models.summarize),
        ] {
            if model.trim().is_empty() {
                return Err(AppError::Config(config::ConfigError::Message(format!(
                    "Model for '{}' cannot be empty",
                    endpoint
                ))));
            }
        }

        Ok(())
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            gemini: GeminiConfig {
                api_key: None,
                base_url: default_base_url(),
                timeout_ms: None,
                models: ModelConfig::default(),
            },
        }
    }
}
