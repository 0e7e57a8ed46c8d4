//! Text generation backend abstraction
//!
//! Handlers only see [`GenerationBackend`]; the Gemini client is the
//! production implementation and tests substitute a scripted one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sampling knobs forwarded to the model; unset fields use the model defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl SamplingParams {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.top_p.is_none() && self.max_output_tokens.is_none()
    }
}

/// A single prompt sent to the model
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub model: String,
    /// User content, sent as-is
    pub prompt: String,
    /// Steering text kept apart from the user content
    pub system_instruction: Option<String>,
    pub params: SamplingParams,
}

impl PromptRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system_instruction: None,
            params: SamplingParams::default(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: Option<String>) -> Self {
        self.system_instruction = instruction;
        self
    }

    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }
}

/// What the model produced
#[derive(Debug, Clone, PartialEq)]
pub struct PromptOutput {
    /// Raw text, untrimmed
    pub text: String,
    /// Total tokens billed for the call, when reported
    pub total_tokens: Option<u32>,
    pub finish_reason: Option<String>,
}

impl PromptOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            total_tokens: None,
            finish_reason: None,
        }
    }
}

/// Trait for text generation backends
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Whether a credential is available for upstream calls
    fn has_credential(&self) -> bool;

    /// Run one prompt through the model
    async fn generate(&self, request: PromptRequest) -> Result<PromptOutput>;
}
