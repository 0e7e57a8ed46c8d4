//! Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Client,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::backend::text_backend::{GenerationBackend, PromptOutput, PromptRequest, SamplingParams};
use crate::config::{GeminiConfig, API_KEY_ENV};
use crate::error::{AppError, Result};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Backend talking to the Gemini REST API
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiBackend {
    /// Create a new Gemini backend. A missing credential is not an error here.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
        })
    }

    fn api_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn get_headers(&self, api_key: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut value = HeaderValue::from_str(api_key).map_err(|_| {
            AppError::Internal(format!("{} contains invalid header characters", API_KEY_ENV))
        })?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), value);

        Ok(headers)
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: PromptRequest) -> Result<PromptOutput> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::MissingCredential(API_KEY_ENV.to_string()))?;

        let url = self.api_url(&request.model);
        let body = GenerateContentRequest::from(&request);

        debug!(
            model = %request.model,
            prompt_len = request.prompt.len(),
            has_system_instruction = request.system_instruction.is_some(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .headers(self.get_headers(api_key)?)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(model = %request.model, error = %e, "Gemini request failed");
                AppError::HttpClient(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);

            warn!(model = %request.model, status = %status, "Gemini API returned an error");
            return Err(AppError::BackendError(format!(
                "Gemini API returned {}: {}",
                status, message
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(model = %request.model, error = %e, "Failed to parse Gemini response");
            AppError::BackendError(format!("Failed to parse response: {}", e))
        })?;

        api_response.into_output()
    }
}

// Gemini API request/response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl From<&PromptRequest> for GenerateContentRequest {
    fn from(request: &PromptRequest) -> Self {
        Self {
            contents: vec![Content::text(Some("user"), &request.prompt)],
            system_instruction: request
                .system_instruction
                .as_deref()
                .map(|instruction| Content::text(None, instruction)),
            generation_config: (!request.params.is_empty())
                .then(|| GenerationConfig::from(&request.params)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl From<&SamplingParams> for GenerationConfig {
    fn from(params: &SamplingParams) -> Self {
        Self {
            temperature: params.temperature,
            top_p: params.top_p,
            max_output_tokens: params.max_output_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    fn into_output(self) -> Result<PromptOutput> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AppError::BackendError(format!("Prompt blocked: {}", reason)));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::BackendError("Gemini returned no candidates".to_string()))?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::BackendError(match candidate.finish_reason {
                Some(reason) => format!("Gemini returned no text (finish reason: {})", reason),
                None => "Gemini returned no text".to_string(),
            }));
        }

        Ok(PromptOutput {
            text,
            total_tokens: self.usage_metadata.and_then(|u| u.total_token_count),
            finish_reason: candidate.finish_reason,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}
