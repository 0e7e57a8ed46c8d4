//! Detection, generation and summarization handlers

use crate::api::envelope::{read_body, Detect, Generate, RawBody, Reply, Summarize};
use crate::api::models::{
    DetectionRequest, DetectionResult, GenerationRequest, GenerationResult, ModelVerdict,
    SummaryRequest, SummaryResult,
};
use crate::backend::{PromptRequest, SamplingParams};
use crate::error::{AppError, Result};
use crate::response::{compression_ratio, extract_object, word_count};
use crate::AppState;
use axum::extract::State;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Shortest text (in characters, after trimming) the detector will classify
pub const MIN_DETECTION_CHARS: usize = 50;

const SUMMARY_DIRECTIVE: &str = "Summarize clearly:";

/// Classify text as AI-generated or human-written
#[utoipa::path(
    post,
    path = "/api/detect",
    tag = "Detection",
    request_body = DetectionRequest,
    responses(
        (status = 200, description = "Verdict, or the same shape with `error` set", body = DetectionResult),
    )
)]
pub async fn detect(State(state): State<Arc<AppState>>, body: RawBody) -> Reply<Detect> {
    Reply::new(run_detect(&state, body).await)
}

/// Generate text from a prompt
#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "Generation",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Generated text", body = GenerationResult),
        (status = 400, description = "Empty prompt or malformed body", body = ErrorBody),
        (status = 500, description = "Missing credential or upstream failure", body = ErrorBody),
    )
)]
pub async fn generate(State(state): State<Arc<AppState>>, body: RawBody) -> Reply<Generate> {
    Reply::new(run_generate(&state, body).await)
}

/// Summarize text
#[utoipa::path(
    post,
    path = "/api/summarize",
    tag = "Summarization",
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Summary", body = SummaryResult),
        (status = 500, description = "Any failure", body = ErrorBody),
    )
)]
pub async fn summarize(State(state): State<Arc<AppState>>, body: RawBody) -> Reply<Summarize> {
    Reply::new(run_summarize(&state, body).await)
}

async fn run_detect(state: &AppState, body: RawBody) -> Result<DetectionResult> {
    let request_id = Uuid::new_v4();
    let request: DetectionRequest = read_body(body)?;
    let text = request.text.trim();

    info!(%request_id, text_len = text.len(), "Received detection request");

    if text.chars().count() < MIN_DETECTION_CHARS {
        return Err(AppError::InvalidInput("Text too short".to_string()));
    }

    let prompt_request = PromptRequest::new(&state.settings.gemini.models.detect, detection_prompt(text))
        .with_params(SamplingParams {
            temperature: Some(0.2),
            ..Default::default()
        });

    let output = state.backend.generate(prompt_request).await?;
    let verdict: ModelVerdict = extract_object(&output.text)?;
    let result = DetectionResult::from(verdict);

    info!(
        %request_id,
        is_ai = result.is_ai,
        confidence = result.confidence,
        "Detection completed"
    );

    Ok(result)
}

async fn run_generate(state: &AppState, body: RawBody) -> Result<GenerationResult> {
    let request_id = Uuid::new_v4();
    let request: GenerationRequest = read_body(body)?;
    let prompt = request.prompt.trim();

    info!(
        %request_id,
        prompt_len = prompt.len(),
        tone = request.tone.as_deref().unwrap_or("-"),
        "Received generation request"
    );

    if prompt.is_empty() {
        return Err(AppError::InvalidInput("Prompt is required".to_string()));
    }

    let max_length = request.max_length.map(|len| len.clamp(50, 1000) as u32);
    let temperature = request.temperature.map(|t| t.clamp(0.0, 1.0) as f32);

    let prompt_request = PromptRequest::new(&state.settings.gemini.models.generate, prompt)
        .with_system_instruction(generation_instruction(request.tone.as_deref(), max_length))
        .with_params(SamplingParams {
            temperature,
            top_p: temperature.map(|_| 0.95),
            max_output_tokens: max_length.map(|len| (len * 4).min(2048)),
        });

    let output = state.backend.generate(prompt_request).await?;
    let generated_text = output.text.trim().to_string();
    let word_count = word_count(&generated_text);

    info!(%request_id, word_count, tokens_used = ?output.total_tokens, "Generation completed");

    Ok(GenerationResult {
        generated_text,
        word_count,
        tokens_used: output.total_tokens,
    })
}

async fn run_summarize(state: &AppState, body: RawBody) -> Result<SummaryResult> {
    let request_id = Uuid::new_v4();
    let request: SummaryRequest = read_body(body)?;

    info!(
        %request_id,
        text_len = request.text.len(),
        format = request.format.as_deref().unwrap_or("-"),
        "Received summarization request"
    );

    let prompt = format!("{}\n{}", SUMMARY_DIRECTIVE, request.text);
    let prompt_request = PromptRequest::new(&state.settings.gemini.models.summarize, prompt)
        .with_system_instruction(summary_instruction(request.format.as_deref(), request.ratio))
        .with_params(SamplingParams {
            temperature: Some(0.4),
            top_p: Some(0.9),
            max_output_tokens: Some(1024),
        });

    let output = state.backend.generate(prompt_request).await?;

    let original_words = word_count(&request.text);
    let summary_words = word_count(&output.text);

    info!(%request_id, original_words, summary_words, "Summarization completed");

    Ok(SummaryResult {
        summary: output.text,
        original_words,
        summary_words,
        compression_ratio: compression_ratio(original_words, summary_words),
    })
}

/// Prompt asking for a JSON verdict on `text`
pub fn detection_prompt(text: &str) -> String {
    format!(
        "Is this AI or human? Respond JSON only: {{\"isAI\": true, \"confidence\": 85, \"reasoning\": \"why\"}}\n\nText: \"{}\"",
        text
    )
}

/// System instruction carrying tone and length hints; the user prompt stays untouched
pub fn generation_instruction(tone: Option<&str>, max_length: Option<u32>) -> Option<String> {
    let mut lines = Vec::new();

    if let Some(tone) = tone.map(str::trim).filter(|t| !t.is_empty()) {
        let tone = tone.to_lowercase();
        if tone != "default" {
            lines.push(format!("Write with a {} tone.", tone));
        }
    }
    if let Some(max_length) = max_length {
        lines.push(format!("Cap the output at roughly {} words.", max_length));
    }

    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// System instruction carrying format and length hints for a summary
pub fn summary_instruction(format: Option<&str>, ratio: Option<f64>) -> Option<String> {
    let mut lines = Vec::new();

    if let Some(format) = format {
        let hint = match format.trim().to_lowercase().as_str() {
            "paragraph" => "Write in 1-2 cohesive paragraphs.",
            "bullets" => "Return a concise bulleted list.",
            "key_points" => "List 3-5 key insights.",
            _ => "Write in paragraphs.",
        };
        lines.push(hint.to_string());
    }
    if let Some(ratio) = ratio.filter(|r| r.is_finite()) {
        let percent = (ratio.clamp(0.1, 0.9) * 100.0).round() as u32;
        lines.push(format!(
            "Target a compression ratio of about {}% of the original length.",
            percent
        ));
    }
    if lines.is_empty() {
        return None;
    }

    lines.push("Avoid introducing new facts.".to_string());
    Some(lines.join("\n"))
}
