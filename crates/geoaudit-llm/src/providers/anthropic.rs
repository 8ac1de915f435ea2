//! Anthropic Messages API provider.

use crate::error::{LlmError, Result};
use crate::provider::{
    CompletionRequest, CompletionResponse, LlmProvider, ProviderCapabilities, Role, Usage,
};
use crate::providers::common::{build_http_client, status_error};
use async_trait::async_trait;
use geoaudit_core::LlmConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "anthropic";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1000;
const CONTEXT_WINDOW: u32 = 200_000;
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Client for `POST /v1/messages`.
pub struct AnthropicProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl AnthropicProvider {
    /// Provider for the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Provider for a specific model.
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: build_http_client(None)?,
        })
    }

    /// Provider configured from the `llm` section.
    ///
    /// Fails with [`LlmError::Unauthorized`] when no API key is set, so a
    /// missing key is reported before any page is rendered.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let Some(api_key) = config.anthropic_api_key.clone() else {
            return Err(LlmError::Unauthorized {
                provider: PROVIDER,
                message: "ANTHROPIC_API_KEY is not set".to_string(),
            });
        };

        Ok(Self {
            api_key,
            model: config.model.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: build_http_client(Some(config.request_timeout_secs))?,
        })
    }

    /// Send requests to another API root, e.g. a proxy or a local stub.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn messages_body<'a>(&'a self, request: &'a CompletionRequest) -> MessagesBody<'a> {
        MessagesBody {
            model: &self.model,
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: request
                .messages
                .iter()
                .map(|m| Turn {
                    role: match m.role {
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    },
                    content: &m.content,
                })
                .collect(),
            system: request.system.as_deref(),
            temperature: request.temperature,
            stop_sequences: (!request.stop_sequences.is_empty())
                .then_some(request.stop_sequences.as_slice()),
        }
    }

    fn decode(body: &str) -> Result<CompletionResponse> {
        let reply: MessagesReply = serde_json::from_str(body).map_err(|e| LlmError::Decode {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        let content = reply
            .content
            .into_iter()
            .filter_map(|block| match block {
                Block::Text { text } => Some(text),
                Block::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(CompletionResponse {
            content,
            model: reply.model,
            stop_reason: reply.stop_reason,
            usage: reply.usage,
        })
    }
}

/// Pull `error.message` out of an API error body, or return the body as is.
fn error_message(body: String) -> String {
    serde_json::from_str::<ErrorReply>(&body).map_or(body, |reply| reply.error.message)
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        request.validate()?;
        let body = self.messages_body(&request);
        tracing::debug!(
            model = %self.model,
            max_tokens = body.max_tokens,
            prompt_chars = request.prompt().len(),
            "sending messages request"
        );

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "messages request rejected");
            return Err(status_error(PROVIDER, status, error_message(text)));
        }

        let completion = Self::decode(&text)?;
        if let Some(usage) = completion.usage {
            tracing::debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                total_tokens = usage.total(),
                stop_reason = ?completion.stop_reason,
                "messages response received"
            );
        }
        Ok(completion)
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            model: self.model.clone(),
            context_window: CONTEXT_WINDOW,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    fn provider_id(&self) -> &str {
        PROVIDER
    }
}

#[derive(Debug, Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Turn<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_sequences: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
struct Turn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesReply {
    content: Vec<Block>,
    model: String,
    stop_reason: Option<String>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Block {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
