//! Proxy client for the upstream generative-text API
//!
//! The upstream is untrusted and its response shape is not guaranteed, so
//! every failure path collapses into a canned reply and the two known
//! candidate-content shapes are resolved here at the boundary.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// Canned reply for an empty message
pub const EMPTY_MESSAGE_REPLY: &str = "Empty message received";
/// Canned reply for an over-long message
pub const TOO_LONG_REPLY: &str = "Message too long. Please shorten your input.";
/// Canned reply when the upstream response has no usable candidates
pub const INVALID_RESPONSE_REPLY: &str = "Invalid response from Gemini API.";
/// Canned reply for any upstream or transport failure
pub const INTERNAL_ERROR_REPLY: &str = "An internal error occurred. Please try again later.";
/// Canned reply for a candidate with no content at all
pub const NO_RESPONSE_REPLY: &str = "Sorry, no response.";

/// Maximum accepted message length in characters
pub const MAX_MESSAGE_CHARS: usize = 1000;

const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

/// Chat proxy configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Upstream endpoint URL; `None` disables the proxy (canned replies only)
    pub api_url: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl ChatConfig {
    /// Build a `ChatConfig` from environment variables
    ///
    /// # Environment Variables
    /// - `CHAT_API_URL`: upstream generative-text endpoint (optional)
    /// - `CHAT_TIMEOUT_SECONDS`: request timeout (default: 20)
    pub fn from_env() -> Self {
        let api_url = std::env::var("CHAT_API_URL").ok().filter(|v| !v.is_empty());
        let timeout_seconds = std::env::var("CHAT_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        ChatConfig {
            api_url,
            timeout_seconds,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    message: Option<CandidateMessage>,
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateMessage {
    #[serde(default)]
    content: Option<CandidateContent>,
}

/// The upstream has been observed returning candidate content either as a
/// nested object with `parts` or as a bare string. Both must be accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum CandidateContent {
    Nested {
        #[serde(default)]
        parts: Vec<ResponsePart>,
    },
    Text(String),
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Client for the upstream generative-text API
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_url: Option<String>,
}

impl ChatClient {
    /// Create a new chat client with a bounded request timeout
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        if config.api_url.is_none() {
            info!("CHAT_API_URL not set; chatbot will answer with canned replies only");
        }
        Ok(ChatClient {
            http,
            api_url: config.api_url.clone(),
        })
    }

    /// Check a user message before proxying; returns the canned reply to
    /// short-circuit with, if any.
    pub fn reject_message(message: &str) -> Option<&'static str> {
        if message.is_empty() {
            return Some(EMPTY_MESSAGE_REPLY);
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Some(TOO_LONG_REPLY);
        }
        None
    }

    /// Forward a message upstream and return the first candidate's text.
    ///
    /// Never fails: timeouts, non-2xx statuses, and undecodable bodies all
    /// reduce to a canned reply.
    pub async fn send(&self, message: &str) -> String {
        let Some(api_url) = &self.api_url else {
            return INTERNAL_ERROR_REPLY.to_string();
        };

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart {
                    text: message.to_string(),
                }],
            }],
        };

        let response = match self.http.post(api_url).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!("Chat upstream request failed: {}", e);
                return INTERNAL_ERROR_REPLY.to_string();
            }
        };

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                error!("Chat upstream returned error status: {}", e);
                return INTERNAL_ERROR_REPLY.to_string();
            }
        };

        match response.json::<GenerateResponse>().await {
            Ok(decoded) => extract_reply(decoded),
            Err(e) => {
                error!("Chat upstream body could not be decoded: {}", e);
                INTERNAL_ERROR_REPLY.to_string()
            }
        }
    }
}

/// Pull the first candidate's text out of a decoded upstream response
fn extract_reply(response: GenerateResponse) -> String {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return INVALID_RESPONSE_REPLY.to_string();
    };

    // Content may sit under `message.content` or directly under `content`.
    let content = candidate
        .message
        .and_then(|m| m.content)
        .or(candidate.content);

    match content {
        Some(CandidateContent::Nested { parts }) => match parts.into_iter().next() {
            Some(part) => part.text,
            None => INVALID_RESPONSE_REPLY.to_string(),
        },
        Some(CandidateContent::Text(text)) => text,
        None => NO_RESPONSE_REPLY.to_string(),
    }
}
