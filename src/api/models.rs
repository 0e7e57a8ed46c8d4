//! API request and response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Detection request
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct DetectionRequest {
    /// Text to classify; must be at least 50 characters once trimmed
    pub text: String,
}

/// Detection response. Failures keep the same shape with `error` set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct DetectionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(rename = "isAI")]
    pub is_ai: bool,

    /// 0-100
    pub confidence: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,

    /// Always 0, kept for client compatibility
    pub perplexity: u32,

    /// Always 0, kept for client compatibility
    pub burstiness: u32,
}

impl DetectionResult {
    /// Confidence reported when no verdict could be reached
    pub const FALLBACK_CONFIDENCE: u8 = 50;

    pub fn verdict(is_ai: bool, confidence: u8, reasoning: Option<String>) -> Self {
        Self {
            error: None,
            is_ai,
            confidence,
            reasoning,
            perplexity: 0,
            burstiness: 0,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            is_ai: false,
            confidence: Self::FALLBACK_CONFIDENCE,
            reasoning: None,
            perplexity: 0,
            burstiness: 0,
        }
    }
}

/// The JSON object the detection prompt asks the model for
#[derive(Debug, Clone, Deserialize)]
pub struct ModelVerdict {
    #[serde(rename = "isAI")]
    pub is_ai: bool,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl From<ModelVerdict> for DetectionResult {
    fn from(verdict: ModelVerdict) -> Self {
        let confidence = verdict
            .confidence
            .filter(|c| c.is_finite())
            .map(|c| c.clamp(0.0, 100.0).round() as u8)
            .unwrap_or(Self::FALLBACK_CONFIDENCE);

        Self::verdict(verdict.is_ai, confidence, verdict.reasoning)
    }
}

/// Text generation request
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Prompt forwarded to the model unmodified
    pub prompt: String,

    /// Writing tone, e.g. "formal" (extension)
    pub tone: Option<String>,

    /// Approximate word cap, clamped to 50-1000 (extension)
    pub max_length: Option<i64>,

    /// Sampling temperature, clamped to 0-1 (extension)
    pub temperature: Option<f64>,
}

/// Text generation response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub generated_text: String,

    /// Whitespace-separated tokens in `generated_text`
    pub word_count: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
}

/// Summarization request
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct SummaryRequest {
    /// Text to summarize, passed through as-is
    pub text: String,

    /// "paragraph", "bullets" or "key_points" (extension)
    pub format: Option<String>,

    /// Target summary length relative to the original, clamped to 0.1-0.9 (extension)
    pub ratio: Option<f64>,
}

/// Summarization response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary: String,
    pub original_words: usize,
    pub summary_words: usize,
    /// e.g. "12.5%", or "N/A" for empty input
    pub compression_ratio: String,
}

/// Error body for the generate and summarize endpoints
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub credential_configured: bool,
}
