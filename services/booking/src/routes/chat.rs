//! Chatbot proxy handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{chat::ChatClient, state::AppState};

/// Request for the chatbot
#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Response from the chatbot
#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Chatbot endpoint: relays the message upstream, or answers with a canned
/// reply when the input is unusable or the upstream misbehaves. Never fails.
pub async fn chatbot(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let message = payload.message.trim();

    if let Some(reply) = ChatClient::reject_message(message) {
        return Json(ChatResponse {
            reply: reply.to_string(),
        });
    }

    let reply = state.chat.send(message).await;
    Json(ChatResponse { reply })
}
