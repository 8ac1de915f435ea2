//! The provider seam: one async call from prompt to generated text.

use crate::error::{LlmError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A text-generation backend.
///
/// Shared behind an `Arc` by every audit, so implementations must be
/// `Send + Sync` and hold no per-request state.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Limits of the configured model.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Stable identifier used in logs and errors.
    fn provider_id(&self) -> &str;
}

/// What the configured model can accept and produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    /// Model identifier sent to the API
    pub model: String,
    /// Prompt plus completion budget, in tokens
    pub context_window: u32,
    /// Largest accepted `max_tokens`
    pub max_output_tokens: u32,
}

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Caller input
    User,
    /// Model output, used to prefill a reply
    Assistant,
}

/// One conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the turn
    pub role: Role,
    /// Plain-text body
    pub content: String,
}

impl Message {
    /// A caller turn.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// A model turn.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Input to [`LlmProvider::complete`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Conversation, starting with a user turn
    pub messages: Vec<Message>,
    /// Instructions kept outside the conversation
    pub system: Option<String>,
    /// Output token cap; the provider default applies when unset
    pub max_tokens: Option<u32>,
    /// Sampling temperature in `0.0..=1.0`
    pub temperature: Option<f32>,
    /// Strings that end generation early
    pub stop_sequences: Vec<String>,
}

impl CompletionRequest {
    /// Single-turn request carrying `prompt`.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            system: None,
            max_tokens: None,
            temperature: None,
            stop_sequences: Vec::new(),
        }
    }

    /// Cap the output length.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set out-of-band instructions.
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Add a stop sequence.
    #[must_use]
    pub fn with_stop_sequence(mut self, stop: impl Into<String>) -> Self {
        self.stop_sequences.push(stop.into());
        self
    }

    /// Text of the first user turn, or `""` if there is none.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map_or("", |m| m.content.as_str())
    }

    /// Reject requests every provider would refuse.
    pub fn validate(&self) -> Result<()> {
        match self.messages.first() {
            None => return Err(LlmError::InvalidRequest("no messages".to_string())),
            Some(first) if first.role != Role::User => {
                return Err(LlmError::InvalidRequest(
                    "conversation must start with a user turn".to_string(),
                ))
            }
            Some(_) => {}
        }
        if self.prompt().trim().is_empty() {
            return Err(LlmError::InvalidRequest("prompt is empty".to_string()));
        }
        if self.max_tokens == Some(0) {
            return Err(LlmError::InvalidRequest("max_tokens must be positive".to_string()));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=1.0).contains(&t) {
                return Err(LlmError::InvalidRequest(format!(
                    "temperature {t} is outside 0.0..=1.0"
                )));
            }
        }
        Ok(())
    }
}

/// Output of [`LlmProvider::complete`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text, text blocks joined by newlines
    pub content: String,
    /// Model that actually answered
    pub model: String,
    /// Why generation stopped, as reported by the provider
    pub stop_reason: Option<String>,
    /// Token accounting, when reported
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// Generation hit the output token cap.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.stop_reason.as_deref() == Some("max_tokens")
    }
}

/// Token accounting for one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    pub input_tokens: u32,
    /// Generated tokens
    pub output_tokens: u32,
}

impl Usage {
    /// Prompt plus generated tokens.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}
