//! Gemini client tests against a mocked generateContent endpoint

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use lexiflow_gateway::{
    api::routes::create_router,
    backend::{GeminiBackend, GenerationBackend, PromptRequest, SamplingParams},
    config::Settings,
    AppError, AppState,
};
use serde_json::json;
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.gemini.base_url = format!("{}/", server.uri());
    settings.gemini.api_key = Some("test-key".to_string());
    settings.gemini.timeout_ms = Some(5_000);
    settings
}

fn candidate(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 6, "totalTokenCount": 10}
    })
}

#[tokio::test]
async fn test_generate_content_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Write a limerick"}]}],
            "generationConfig": {"maxOutputTokens": 256}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("There once was a crate")))
        .expect(1)
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(&settings_for(&server).gemini).unwrap();
    assert!(backend.has_credential());

    let output = backend
        .generate(
            PromptRequest::new("gemini-1.5-flash", "Write a limerick").with_params(SamplingParams {
                max_output_tokens: Some(256),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

    assert_eq!(output.text, "There once was a crate");
    assert_eq!(output.total_tokens, Some(10));
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(&settings_for(&server).gemini).unwrap();
    let err = backend
        .generate(PromptRequest::new("gemini-pro", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BackendError(_)));
    let message = err.to_string();
    assert!(message.contains("429"));
    assert!(message.contains("Resource has been exhausted"));
}

#[tokio::test]
async fn test_unparseable_response_is_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(&settings_for(&server).gemini).unwrap();
    let err = backend
        .generate(PromptRequest::new("gemini-pro", "hi"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to parse response"));
}

#[tokio::test]
async fn test_unreachable_upstream_is_http_error() {
    // Bind and release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let mut settings = Settings::default();
    settings.gemini.base_url = format!("http://127.0.0.1:{}", port);
    settings.gemini.api_key = Some("test-key".to_string());

    let backend = GeminiBackend::new(&settings.gemini).unwrap();
    let err = backend
        .generate(PromptRequest::new("gemini-pro", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::HttpClient(_)));
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings.gemini.api_key = None;

    let backend = GeminiBackend::new(&settings.gemini).unwrap();
    let err = backend
        .generate(PromptRequest::new("gemini-pro", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingCredential(_)));
}

#[tokio::test]
async fn test_generate_endpoint_through_gemini() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Greet me"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("  Hello there, friend!  ")))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::from_settings(settings_for(&server)).unwrap();
    let app = create_router(Arc::new(state));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/generate")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"prompt":"Greet me"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        json!({"generatedText": "Hello there, friend!", "wordCount": 3, "tokensUsed": 10})
    );
}
