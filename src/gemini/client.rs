use super::types::GenerateContentRequest;
use super::{BackendOutcome, GenerateContentService};
use crate::models::{Config, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Gemini REST client that reports every call as a [`BackendOutcome`].
///
/// The API key travels as the `key` query parameter. Non-2xx responses are not
/// errors at this level; status and body are handed back for classification.
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    api_version: String,
    timeout: Option<Duration>,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-2.5-pro`); a
    /// `models/` prefix is stripped. `timeout` of `None` waits indefinitely.
    pub fn new(api_key: String, model: String, timeout: Option<Duration>) -> Self {
        Self::new_with_client(api_key, model, timeout, Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Option<Duration>,
        client: Client,
    ) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.request_timeout,
        )
        .with_base_url(config.gemini_base_url.clone())
        .with_api_version(config.gemini_api_version.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, api_version: String) -> Self {
        self.api_version = api_version;
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Endpoint for `generateContent`, without the credential.
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, self.api_version, self.model
        )
    }

    async fn post_to_url<Req: Serialize + Sync>(
        &self,
        url: String,
        request: &Req,
    ) -> BackendOutcome {
        let mut builder = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let description = describe_transport_error(e);
                tracing::error!("Failed to send request to Gemini: {}", description);
                return BackendOutcome::TransportFailure(description);
            }
        };

        let status = response.status();
        match response.bytes().await {
            Ok(body) => BackendOutcome::Response { status, body },
            Err(e) => {
                let description = describe_transport_error(e);
                tracing::error!("Failed to read Gemini response body: {}", description);
                BackendOutcome::TransportFailure(description)
            }
        }
    }
}

#[async_trait]
impl GenerateContentService for GeminiHttpClient {
    async fn generate_content(&self, request: &GenerateContentRequest) -> BackendOutcome {
        tracing::debug!(
            "Sending generateContent request to Gemini ({} contents)",
            request.contents.len()
        );
        self.post_to_url(self.generate_content_url(), request).await
    }
}

/// Flattens a reqwest error and its sources into one line.
///
/// The request URL is dropped because it carries the API key.
fn describe_transport_error(err: reqwest::Error) -> String {
    format!("{:#}", anyhow::Error::new(err.without_url()))
}
