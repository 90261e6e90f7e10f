//! Data models and structures
//!
//! Defines the OpenAI-compatible request/response shapes served to clients
//! and the gateway configuration loaded from the environment.

use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Identifier reported on every completion envelope.
pub const COMPLETION_ID: &str = "chatcmpl-gemini";

/// Owner reported on the advertised model card.
pub const MODEL_OWNER: &str = "google";

/// Role of an inbound chat message.
///
/// Roles outside the three OpenAI conversation roles are kept verbatim so the
/// mapper can decide what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    Other(String),
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: String,
}

/// Accepts a plain string, `null`, or an array of content parts.
///
/// Text parts are joined with newlines; non-text parts are ignored.
fn deserialize_content<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawContent {
        Text(String),
        Parts(Vec<ContentPart>),
    }

    #[derive(Deserialize)]
    struct ContentPart {
        #[serde(default)]
        text: Option<String>,
    }

    Ok(match Option::<RawContent>::deserialize(deserializer)? {
        None => String::new(),
        Some(RawContent::Text(text)) => text,
        Some(RawContent::Parts(parts)) => parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

/// Inbound `chat/completions` body. Fields other than `messages` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

impl ChatCompletionResponse {
    /// Wraps a single answer in the completion envelope.
    pub fn from_answer(model: &str, answer: String) -> Self {
        Self {
            id: COMPLETION_ID.to_string(),
            object: "chat.completion".to_string(),
            created: 0,
            model: model.to_string(),
            choices: vec![ChatChoice {
                index: 0,
                message: AssistantMessage {
                    role: "assistant".to_string(),
                    content: answer,
                },
                finish_reason: "stop".to_string(),
            }],
            usage: Usage::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub role: String,
    pub content: String,
}

/// Token accounting is not tracked; every counter stays zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelCard>,
}

impl ModelList {
    pub fn single(model: &str) -> Self {
        Self {
            object: "list".to_string(),
            data: vec![ModelCard {
                id: model.to_string(),
                object: "model".to_string(),
                created: 0,
                owned_by: MODEL_OWNER.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCard {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub owned_by: String,
}

// Configuration
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 40;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend credential. Not validated here; a missing key surfaces as a
    /// backend authentication error on the first call.
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_api_version: String,
    /// `None` leaves outbound calls unbounded.
    pub request_timeout: Option<Duration>,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> crate::Result<Self> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                crate::Error::Config(format!("PORT must be a port number, got '{}'", raw))
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match var("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                crate::Error::Config(format!(
                    "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            gemini_api_key: lookup("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            gemini_api_version: var("GEMINI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
