//! Error types shared by the configuration layer, the Gemini client and the handlers

use crate::response::extract::ExtractError;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AppError>;

/// Every fault a request (or startup) can run into
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Missing {0}")]
    MissingCredential(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Malformed model output: {0}")]
    ModelOutput(#[from] ExtractError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used to pick a status code per endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Missing credential or broken configuration
    Configuration,
    /// Caller sent something unusable
    InvalidInput,
    /// The generation API failed or refused
    Upstream,
    /// The model answered, but not in the requested shape
    ModelOutput,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> FaultKind {
        match self {
            AppError::Config(_) | AppError::MissingCredential(_) => FaultKind::Configuration,
            AppError::InvalidInput(_) | AppError::InvalidPayload(_) => FaultKind::InvalidInput,
            AppError::HttpClient(_) | AppError::BackendError(_) => FaultKind::Upstream,
            AppError::ModelOutput(_) => FaultKind::ModelOutput,
            AppError::Internal(_) => FaultKind::Internal,
        }
    }

    /// Whether the caller is to blame
    pub fn is_client_error(&self) -> bool {
        self.kind() == FaultKind::InvalidInput
    }
}
