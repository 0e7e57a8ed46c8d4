//! Configuration module

pub mod settings;

pub use settings::{
    GeminiConfig, LoggingConfig, ModelConfig, ServerConfig, Settings, API_KEY_ENV,
};
