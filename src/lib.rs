//! OpenAI-compatible chat completions gateway for the Gemini API
//!
//! Accepts `chat/completions` requests, checks the client key shape, maps the
//! chat history onto a Gemini `generateContent` call and translates the answer
//! back into an OpenAI completion envelope. Backend errors pass through as-is.

pub mod auth;
pub mod error;
pub mod gemini;
pub mod mapper;
pub mod models;
pub mod server;
pub mod translator;

pub use error::{Error, Result};
