//! HTTP surface of the gateway.
//!
//! Every completions spelling routes to the same handler. The model listing
//! and root health check need no key.

use crate::gemini::{GeminiHttpClient, GenerateContentService};
use crate::models::{ChatCompletionRequest, Config, ModelList};
use crate::{auth, mapper, translator, Error, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info};

pub const CHAT_COMPLETIONS_PATHS: [&str; 8] = [
    "/v1/chat/completions",
    "/v1/chat/completions/",
    "/chat/completions",
    "/chat/completions/",
    "/chat/completion",
    "/chat/completion/",
    "/v1/chat/completion",
    "/v1/chat/completion/",
];

pub const MODELS_PATHS: [&str; 4] = ["/v1/models", "/v1/models/", "/models", "/models/"];

/// Immutable per-process state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn GenerateContentService>,
    model: Arc<str>,
}

impl AppState {
    pub fn new(backend: Arc<dyn GenerateContentService>, model: &str) -> Self {
        Self {
            backend,
            model: Arc::from(model),
        }
    }

    /// Builds the live Gemini backend and advertises the model ID it calls.
    pub fn from_config(config: &Config) -> Self {
        let client = GeminiHttpClient::from_config(config);
        let model = client.model().to_string();
        Self::new(Arc::new(client), &model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new().route("/", get(health));
    for path in CHAT_COMPLETIONS_PATHS {
        router = router.route(path, post(chat_completions));
    }
    for path in MODELS_PATHS {
        router = router.route(path, get(list_models));
    }

    router
        .fallback(handle_fallback)
        .layer(cors_layer())
        .with_state(state)
}

/// Browsers may call the gateway from any origin.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Serves the gateway on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn chat_completions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    auth::authorize(&headers)?;

    let request: ChatCompletionRequest = serde_json::from_slice(&body)
        .map_err(|e| Error::MalformedRequest(format!("invalid request body: {}", e)))?;
    debug!(
        "Chat completion request with {} messages",
        request.messages.len()
    );

    let payload = mapper::map_messages(&request.messages);
    let outcome = state.backend.generate_content(&payload).await;

    Ok(translator::translate(outcome, state.model()).into_response())
}

async fn list_models(State(state): State<AppState>) -> Json<ModelList> {
    Json(ModelList::single(state.model()))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn handle_fallback() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
