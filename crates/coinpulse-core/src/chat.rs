//! Chat assistant client and conversation state.
//!
//! The assistant lives behind `POST {base_url}/api/chat`:
//!
//! ```text
//! request:  { "message": "...", "coin_id": "bitcoin" | null,
//!             "conversation_history": [ { "role": "user", "content": "..." }, ... ] }
//! response: { "response": "...", "coin_data": { ... } | null }
//! error:    { "detail": "..." }
//! ```

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ChatConfig;
use crate::error::{CoreError, CoreResult};
use crate::types::ChatTurn;

/// Opening line shown before the user asks anything.
pub const GREETING: &str = "Hi! I'm your crypto assistant. Ask me anything about cryptocurrencies, specific coins, market trends, or blockchain technology!";

const FALLBACK_ERROR: &str = "Failed to get response from chatbot";

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub coin_id: Option<String>,
    pub conversation_history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub coin_data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Anything that can answer a chat request.
pub trait ChatBackend: Send + Sync {
    fn ask(&self, request: ChatRequest) -> impl Future<Output = CoreResult<ChatReply>> + Send;
}

/// HTTP client for the chat backend.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(config: &ChatConfig) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    pub async fn send(&self, request: &ChatRequest) -> CoreResult<ChatReply> {
        let response = self
            .http
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| CoreError::Chat(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(&body);
            warn!(%status, detail = %detail, "Chat backend returned an error");
            return Err(CoreError::Chat(detail));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| CoreError::Chat(e.to_string()))
    }
}

impl ChatBackend for ChatClient {
    fn ask(&self, request: ChatRequest) -> impl Future<Output = CoreResult<ChatReply>> + Send {
        async move { self.send(&request).await }
    }
}

/// The backend's `detail` field, or a generic message.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| FALLBACK_ERROR.to_string())
}

/// A chat transcript plus the rules for talking to the backend.
#[derive(Debug, Clone)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
    history_limit: usize,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Conversation {
    /// Start with the assistant greeting; at most `history_limit` previous
    /// turns travel with each question.
    pub fn new(history_limit: usize) -> Self {
        Self {
            turns: vec![ChatTurn::assistant(GREETING)],
            history_limit,
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The most recent `history_limit` turns.
    pub fn history_window(&self) -> Vec<ChatTurn> {
        let start = self.turns.len().saturating_sub(self.history_limit);
        self.turns[start..].to_vec()
    }

    /// Record the user's question and build the request for it.
    ///
    /// Returns `None` for blank input. The history is taken before the new
    /// question is appended.
    pub fn begin(&mut self, message: &str, coin_id: Option<&str>) -> Option<ChatRequest> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let request = ChatRequest {
            message: message.to_string(),
            coin_id: coin_id.map(str::to_string),
            conversation_history: self.history_window(),
        };
        self.turns.push(ChatTurn::user(message));
        Some(request)
    }

    /// Record the backend's answer, or an inline error message.
    pub fn complete(&mut self, result: CoreResult<ChatReply>) -> &ChatTurn {
        let turn = match result {
            Ok(reply) => ChatTurn::assistant(reply.response),
            Err(e) => ChatTurn::assistant(format!(
                "Sorry, I encountered an error: {}. Please try again.",
                e
            )),
        };
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    /// Ask a question and record the answer. Blank input is ignored.
    pub async fn send<B: ChatBackend>(
        &mut self,
        backend: &B,
        message: &str,
        coin_id: Option<&str>,
    ) -> Option<ChatTurn> {
        let request = self.begin(message, coin_id)?;
        debug!(history = request.conversation_history.len(), "Sending chat question");
        let result = backend.ask(request).await;
        Some(self.complete(result).clone())
    }
}
