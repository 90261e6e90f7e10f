use super::types::GenerateContentRequest;
use super::{BackendOutcome, GenerateContentService};
use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// In-process stand-in for the Gemini backend.
///
/// Queued outcomes are replayed in order and cycle once exhausted. With no
/// queued outcomes the mock answers 200 with the last request text echoed back.
#[derive(Clone)]
pub struct MockGeminiClient {
    outcomes: Arc<Mutex<Vec<BackendOutcome>>>,
    requests: Arc<Mutex<Vec<GenerateContentRequest>>>,
}

impl MockGeminiClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, status: StatusCode, body: Value) -> Self {
        self.with_raw_response(status, body.to_string())
    }

    /// Queues a response whose body is replayed byte for byte.
    pub fn with_raw_response(self, status: StatusCode, body: impl Into<Bytes>) -> Self {
        self.outcomes.lock().unwrap().push(BackendOutcome::Response {
            status,
            body: body.into(),
        });
        self
    }

    /// Queues a 200 response carrying a single candidate with `text`.
    pub fn with_text_response(self, text: &str) -> Self {
        self.with_response(StatusCode::OK, candidate_json(text))
    }

    pub fn with_transport_failure(self, description: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(BackendOutcome::TransportFailure(description.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockGeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn candidate_body(text: &str) -> Bytes {
    Bytes::from(candidate_json(text).to_string())
}

fn candidate_json(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[async_trait]
impl GenerateContentService for MockGeminiClient {
    async fn generate_content(&self, request: &GenerateContentRequest) -> BackendOutcome {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request.clone());
        let count = requests.len();

        let outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            // Default mock response
            let last_text = request
                .contents
                .last()
                .and_then(|content| content.parts.first())
                .map(|part| part.text.as_str())
                .unwrap_or_default();
            BackendOutcome::Response {
                status: StatusCode::OK,
                body: candidate_body(&format!("echo: {}", last_text)),
            }
        } else {
            outcomes[(count - 1) % outcomes.len()].clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::types::{BackendRole, Content, Part};

    fn request(text: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: BackendRole::User,
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }],
        }
    }

    #[tokio::test]
    async fn test_mock_default_echoes_last_text() {
        let client = MockGeminiClient::new();

        let outcome = client.generate_content(&request("ping")).await;
        assert_eq!(
            outcome,
            BackendOutcome::Response {
                status: StatusCode::OK,
                body: candidate_body("echo: ping"),
            }
        );
    }

    #[tokio::test]
    async fn test_mock_cycles_queued_outcomes() {
        let client = MockGeminiClient::new()
            .with_text_response("first")
            .with_transport_failure("connection refused");

        let first = client.generate_content(&request("a")).await;
        assert!(matches!(first, BackendOutcome::Response { .. }));

        let second = client.generate_content(&request("b")).await;
        assert_eq!(
            second,
            BackendOutcome::TransportFailure("connection refused".to_string())
        );

        // Should cycle back
        let third = client.generate_content(&request("c")).await;
        assert_eq!(third, first);
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let client = MockGeminiClient::new();
        assert_eq!(client.get_call_count(), 0);

        client.generate_content(&request("one")).await;
        client.generate_content(&request("two")).await;

        assert_eq!(client.get_call_count(), 2);
        assert_eq!(client.requests()[1], request("two"));
    }
}
