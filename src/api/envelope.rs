//! Mapping of handler outcomes onto each endpoint's fixed JSON envelope
//!
//! Every endpoint guarantees one success shape and one error shape. Handlers
//! produce `Result<Success, AppError>`; [`Reply`] turns that into the HTTP
//! response, asking the endpoint's [`Endpoint`] impl for the status code and
//! the error body. No fault escapes as anything other than the envelope.

use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use tracing::{error, warn};

use crate::api::models::{DetectionResult, ErrorBody, GenerationResult, SummaryResult};
use crate::error::{AppError, FaultKind, Result};

/// Response contract of one endpoint
pub trait Endpoint {
    const NAME: &'static str;

    type Success: Serialize;
    type Failure: Serialize;

    fn failure_status(kind: FaultKind) -> StatusCode;

    fn failure_body(message: String) -> Self::Failure;
}

/// AI-text detection: failures are reported in-band with status 200
pub struct Detect;

impl Endpoint for Detect {
    const NAME: &'static str = "detect";

    type Success = DetectionResult;
    type Failure = DetectionResult;

    fn failure_status(_kind: FaultKind) -> StatusCode {
        StatusCode::OK
    }

    fn failure_body(message: String) -> DetectionResult {
        DetectionResult::failure(message)
    }
}

/// Text generation: 400 for caller mistakes, 500 otherwise
pub struct Generate;

impl Endpoint for Generate {
    const NAME: &'static str = "generate";

    type Success = GenerationResult;
    type Failure = ErrorBody;

    fn failure_status(kind: FaultKind) -> StatusCode {
        match kind {
            FaultKind::InvalidInput => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn failure_body(message: String) -> ErrorBody {
        ErrorBody { error: message }
    }
}

/// Summarization: every failure is a 500
pub struct Summarize;

impl Endpoint for Summarize {
    const NAME: &'static str = "summarize";

    type Success = SummaryResult;
    type Failure = ErrorBody;

    fn failure_status(_kind: FaultKind) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn failure_body(message: String) -> ErrorBody {
        ErrorBody { error: message }
    }
}

/// Outcome of one request to endpoint `E`
pub struct Reply<E: Endpoint> {
    outcome: Result<E::Success>,
    _endpoint: PhantomData<E>,
}

impl<E: Endpoint> Reply<E> {
    pub fn new(outcome: Result<E::Success>) -> Self {
        Self {
            outcome,
            _endpoint: PhantomData,
        }
    }

    /// Status code and body that will be written, without building a response
    pub fn into_parts(self) -> (StatusCode, serde_json::Value) {
        match self.outcome {
            Ok(body) => (StatusCode::OK, to_value(&body)),
            Err(err) => {
                let status = E::failure_status(err.kind());
                if err.is_client_error() {
                    warn!(endpoint = E::NAME, error = %err, "Request rejected");
                } else {
                    error!(endpoint = E::NAME, error = %err, status = %status, "Request failed");
                }
                (status, to_value(&E::failure_body(err.to_string())))
            }
        }
    }
}

impl<E: Endpoint> From<Result<E::Success>> for Reply<E> {
    fn from(outcome: Result<E::Success>) -> Self {
        Self::new(outcome)
    }
}

impl<E: Endpoint> IntoResponse for Reply<E> {
    fn into_response(self) -> Response {
        let (status, body) = self.into_parts();
        (status, Json(body)).into_response()
    }
}

fn to_value<T: Serialize>(body: &T) -> serde_json::Value {
    serde_json::to_value(body).unwrap_or_else(|e| {
        error!(error = %e, "Failed to serialize response body");
        serde_json::json!({ "error": "Internal error: failed to serialize response" })
    })
}

/// Request body as handed to the handlers; buffering failures (e.g. the size
/// limit) stay in-band so they reach the endpoint's envelope
pub type RawBody = std::result::Result<Bytes, BytesRejection>;

/// Parse a buffered-or-rejected body
pub fn read_body<T: DeserializeOwned + Default>(body: RawBody) -> Result<T> {
    let bytes = body.map_err(|rejection| AppError::InvalidPayload(rejection.body_text()))?;
    parse_body(&bytes)
}

/// Parse a JSON request body; an empty body reads as `{}`
pub fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::InvalidPayload(e.to_string()))
}
