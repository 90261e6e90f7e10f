//! Gemini backend integration
//!
//! The gateway talks to exactly one backend through [`GenerateContentService`].
//! Each call resolves to a [`BackendOutcome`]: either the backend answered
//! (with any status) or it could not be reached at all.

pub mod client;
pub mod mock;
pub mod types;

pub use client::GeminiHttpClient;
pub use mock::MockGeminiClient;
pub use types::{BackendRole, Content, GenerateContentRequest, GenerateContentResponse, Part};

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;

/// Result of one outbound `generateContent` call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendOutcome {
    /// The backend replied. Success and failure statuses both land here, with
    /// the body exactly as received.
    Response { status: StatusCode, body: Bytes },
    /// Connection, DNS, TLS or timeout failure, already flattened to text.
    TransportFailure(String),
}

#[async_trait]
pub trait GenerateContentService: Send + Sync {
    async fn generate_content(&self, request: &GenerateContentRequest) -> BackendOutcome;
}

#[cfg(test)]
pub(crate) mod test_support {
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockBuilder};

    pub const GENERATE_CONTENT_PATH_REGEX: &str = r"^/v1(beta)?/models/[^/]+:generateContent$";

    pub fn post_path_regex(pattern: &str) -> MockBuilder {
        Mock::given(method("POST")).and(path_regex(pattern))
    }
}
