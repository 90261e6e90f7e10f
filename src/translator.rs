//! Backend outcome to client response translation.
//!
//! Decision order: an unreachable backend is a 502; any non-200 status or a
//! body without a usable first candidate is forwarded untouched with the
//! backend's status; otherwise the first candidate's first text part becomes
//! the assistant message of a completion envelope.

use crate::gemini::{BackendOutcome, GenerateContentResponse};
use crate::models::ChatCompletionResponse;
use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::IgnoredAny;
use serde_json::json;

const UNREACHABLE_FALLBACK: &str = "backend unreachable";

#[derive(Debug, Clone, PartialEq)]
pub enum Translated {
    Completion(ChatCompletionResponse),
    /// Backend diagnostics forwarded byte for byte.
    Passthrough { status: StatusCode, body: Bytes },
    Unreachable(String),
}

pub fn translate(outcome: BackendOutcome, model: &str) -> Translated {
    match outcome {
        BackendOutcome::TransportFailure(description) => Translated::Unreachable(description),
        BackendOutcome::Response { status, body } => {
            if status != StatusCode::OK {
                tracing::warn!("Gemini API error (status {}), forwarding body", status);
                return Translated::Passthrough { status, body };
            }

            match extract_answer(&body) {
                Some(answer) => {
                    Translated::Completion(ChatCompletionResponse::from_answer(model, answer))
                }
                None => {
                    tracing::warn!("Gemini response has no usable candidate, forwarding body");
                    Translated::Passthrough { status, body }
                }
            }
        }
    }
}

fn extract_answer(body: &[u8]) -> Option<String> {
    let response: GenerateContentResponse = serde_json::from_slice(body).ok()?;
    response.first_text().map(str::to_string)
}

fn passthrough_content_type(body: &[u8]) -> HeaderValue {
    if serde_json::from_slice::<IgnoredAny>(body).is_ok() {
        HeaderValue::from_static("application/json")
    } else {
        HeaderValue::from_static("text/plain; charset=utf-8")
    }
}

impl IntoResponse for Translated {
    fn into_response(self) -> Response {
        match self {
            Translated::Completion(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
            Translated::Passthrough { status, body } => {
                let content_type = passthrough_content_type(&body);
                let mut response = Response::new(Body::from(body));
                *response.status_mut() = status;
                response
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, content_type);
                response
            }
            Translated::Unreachable(description) => {
                let description = if description.is_empty() {
                    UNREACHABLE_FALLBACK.to_string()
                } else {
                    description
                };
                (StatusCode::BAD_GATEWAY, Json(json!({ "error": description }))).into_response()
            }
        }
    }
}
