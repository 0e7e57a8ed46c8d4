//! Lexiflow Gateway
//!
//! HTTP service exposing three stateless endpoints (AI-text detection, text
//! generation and summarization) that forward to the Gemini API and relay
//! its answer in a fixed JSON envelope.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod response;

pub use error::{AppError, Result};

use std::sync::Arc;

use backend::{GeminiBackend, GenerationBackend};

/// Application state shared across all handlers. Read-only after startup.
pub struct AppState {
    pub settings: Arc<config::Settings>,
    pub backend: Arc<dyn GenerationBackend>,
}

impl AppState {
    pub fn new(settings: config::Settings, backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            settings: Arc::new(settings),
            backend,
        }
    }

    /// Build the state with the Gemini backend described by `settings`
    pub fn from_settings(settings: config::Settings) -> Result<Self> {
        let backend = Arc::new(GeminiBackend::new(&settings.gemini)?);
        Ok(Self::new(settings, backend))
    }
}
