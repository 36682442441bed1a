//! Language-model extraction of transfer details.
//!
//! The model is asked to restate a free-text request in a fixed one-line
//! grammar or answer with a sentinel. Its reply is returned untouched; the
//! parser decides whether it is usable.
//!
//! Speaks the OpenAI-compatible `/chat/completions` format.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::schema::ModelConfig;
use crate::observability::metrics;

/// Exact reply the model gives when a request lacks an amount or address.
pub const INVALID_REQUEST_SENTINEL: &str = "Invalid transaction request";

/// Sampling temperature for every extraction. Zero keeps replies
/// deterministic for a given prompt.
pub const TEMPERATURE: f32 = 0.0;

/// Instruction sent ahead of every user message.
pub const SYSTEM_PROMPT: &str = "\
You extract transfer details from natural language requests.
Given a user message, find the amount of HBAR to send and the recipient address (0x followed by 40 hex digits).
If the message does not contain both, reply exactly: Invalid transaction request

Example requests:
- \"Send 50 HBAR to 0x123...\"
- \"I want to transfer 25 HBAR to 0x456...\"
- \"Can you please send 10 HBAR to 0x789?\"

Reply format:
- If valid: Amount: <amount> HBAR, Address: <address>
- If invalid: Invalid transaction request";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("model request failed: {0}")]
    Transport(String),

    #[error("model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model response could not be decoded: {0}")]
    Decode(String),

    #[error("model returned no content")]
    EmptyResponse,
}

/// Turns user text into the model's textual extraction.
#[async_trait]
pub trait IntentExtractor: Send + Sync {
    async fn extract(&self, user_text: &str) -> Result<String, ExtractionError>;
}

/// Chat-completions client.
pub struct LlmClient {
    client: Client,
    api_key: SecretString,
    api_url: String,
    model: String,
}

impl LlmClient {
    /// Build a client from the model settings and credential.
    pub fn new(config: &ModelConfig, api_key: SecretString) -> Result<Self, ExtractionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExtractionError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        })
    }
}

impl LlmClient {
    async fn complete(&self, user_text: &str) -> Result<String, ExtractionError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: [
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: user_text,
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Decode(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ExtractionError::EmptyResponse)
    }
}

/// Metrics label for a finished model call.
fn call_status(result: &Result<String, ExtractionError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(ExtractionError::Transport(_)) => "transport_error",
        Err(ExtractionError::Api { .. }) => "api_error",
        Err(ExtractionError::Decode(_)) => "decode_error",
        Err(ExtractionError::EmptyResponse) => "empty_response",
    }
}

#[async_trait]
impl IntentExtractor for LlmClient {
    async fn extract(&self, user_text: &str) -> Result<String, ExtractionError> {
        let result = self.complete(user_text).await;
        metrics::record_model_call(call_status(&result));
        result
    }
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [Message<'a>; 2],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
