//! Unit tests for the fault-to-envelope mapping

use axum::http::StatusCode;
use lexiflow_gateway::api::envelope::{Detect, Endpoint, Generate, Reply, Summarize};
use lexiflow_gateway::api::models::{GenerationResult, SummaryResult};
use lexiflow_gateway::error::FaultKind;
use lexiflow_gateway::response::ExtractError;
use lexiflow_gateway::AppError;
use serde_json::json;

fn faults() -> Vec<AppError> {
    vec![
        AppError::MissingCredential("GEMINI_API_KEY".to_string()),
        AppError::InvalidInput("Text too short".to_string()),
        AppError::InvalidPayload("EOF while parsing".to_string()),
        AppError::BackendError("Gemini API returned 500".to_string()),
        AppError::ModelOutput(ExtractError::NoObject),
        AppError::Internal("unexpected".to_string()),
    ]
}

#[test]
fn test_detect_failures_are_in_band() {
    for fault in faults() {
        let message = fault.to_string();
        let (status, body) = Reply::<Detect>::new(Err(fault)).into_parts();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"error": message, "isAI": false, "confidence": 50, "perplexity": 0, "burstiness": 0})
        );
    }
}

#[test]
fn test_detect_failure_keeps_field_order() {
    let (_, body) =
        Reply::<Detect>::new(Err(AppError::InvalidInput("Text too short".to_string()))).into_parts();

    assert_eq!(
        serde_json::to_string(&body).unwrap(),
        r#"{"error":"Text too short","isAI":false,"confidence":50,"perplexity":0,"burstiness":0}"#
    );
}

#[test]
fn test_generate_status_by_kind() {
    assert_eq!(
        Generate::failure_status(FaultKind::InvalidInput),
        StatusCode::BAD_REQUEST
    );
    for kind in [
        FaultKind::Configuration,
        FaultKind::Upstream,
        FaultKind::ModelOutput,
        FaultKind::Internal,
    ] {
        assert_eq!(Generate::failure_status(kind), StatusCode::INTERNAL_SERVER_ERROR);
    }

    for fault in faults() {
        let message = fault.to_string();
        let (_, body) = Reply::<Generate>::new(Err(fault)).into_parts();
        assert_eq!(body, json!({ "error": message }));
    }
}

#[test]
fn test_summarize_always_server_error() {
    for fault in faults() {
        let (status, body) = Reply::<Summarize>::new(Err(fault)).into_parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
        assert_eq!(body.as_object().unwrap().len(), 1);
    }
}

#[test]
fn test_success_passes_through() {
    let (status, body) = Reply::<Generate>::new(Ok(GenerationResult {
        generated_text: "hello world".to_string(),
        word_count: 2,
        tokens_used: None,
    }))
    .into_parts();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"generatedText": "hello world", "wordCount": 2}));

    let (status, body) = Reply::<Summarize>::new(Ok(SummaryResult {
        summary: "short".to_string(),
        original_words: 10,
        summary_words: 1,
        compression_ratio: "10.0%".to_string(),
    }))
    .into_parts();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "short");
}
