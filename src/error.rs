//! Error handling and custom error types
//!
//! Provides unified error handling across the gateway using thiserror. Errors
//! that reach a request handler are rendered as `{"error": ...}` JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("invalid key")]
    InvalidKey,

    #[error("{0}")]
    MalformedRequest(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidKey => StatusCode::UNAUTHORIZED,
            Error::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
