//! OpenAI-compatible Chat Completions provider
//!
//! Structured requests are sent with
//! `response_format = {"type": "json_schema", ...}` so the backend itself
//! constrains the answer. Any server speaking the same protocol (xAI, vLLM,
//! LM Studio, Azure deployments) works through
//! [`OpenAIConfig::with_api_base`].
//!
//! ```no_run
//! use news_llm::{CompletionRequest, LLMProvider};
//! use news_llm::providers::OpenAIProvider;
//!
//! # async fn run() -> news_llm::Result<()> {
//! let provider = OpenAIProvider::from_env()?;
//! let response = provider
//!     .complete(CompletionRequest::new("gpt-4o-mini").with_user("Hello!"))
//!     .await?;
//! println!("{}", response.message.content);
//! # Ok(())
//! # }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, ResponseSchema,
    Result, StopReason, TokenUsage,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,

    /// Root of the API, without the `/chat/completions` suffix
    pub api_base: String,

    pub timeout_secs: u64,

    /// Send `strict: true` with schemas; some compatible servers reject it
    pub strict_schemas: bool,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strict_schemas: true,
        }
    }
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// `OPENAI_API_KEY` (required, non-blank) and `OPENAI_API_BASE` (optional)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LLMError::ConfigurationError(
                    "OPENAI_API_KEY is not set; export it or add it to a .env file".to_string(),
                )
            })?;

        let mut config = Self::new(api_key);
        if let Some(api_base) = std::env::var("OPENAI_API_BASE")
            .ok()
            .filter(|base| !base.trim().is_empty())
        {
            config.api_base = api_base;
        }
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_strict_schemas(mut self, strict: bool) -> Self {
        self.strict_schemas = strict;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

/// [`LLMProvider`] over the Chat Completions API
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }

    /// See [`OpenAIConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        Self::with_config(OpenAIConfig::from_env()?)
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn response_format(&self, schema: &ResponseSchema) -> wire::ResponseFormat {
        wire::ResponseFormat {
            kind: "json_schema",
            json_schema: wire::JsonSchema {
                name: schema.name.clone(),
                description: schema.description.clone(),
                schema: schema.schema.clone(),
                strict: self.config.strict_schemas,
            },
        }
    }

    fn chat_body(&self, request: &CompletionRequest) -> wire::ChatRequest {
        let system = request.system.iter().map(|content| wire::ChatMessage {
            role: "system",
            content: content.clone(),
        });
        let turns = request.messages.iter().map(|message| wire::ChatMessage {
            role: message.role.as_str(),
            content: message.content.clone(),
        });

        wire::ChatRequest {
            model: request.model.clone(),
            messages: system.chain(turns).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: request
                .response_schema
                .as_ref()
                .map(|schema| self.response_format(schema)),
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    #[instrument(skip_all, fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&self.chat_body(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(status_error(status, body, request.model));
        }

        let reply: wire::ChatResponse = response.json().await.map_err(|e| {
            LLMError::UnexpectedResponse(format!("Malformed chat completion body: {e}"))
        })?;

        let usage = reply.usage.unwrap_or_default();
        let choice = reply.choices.into_iter().next().ok_or_else(|| {
            LLMError::UnexpectedResponse("Chat completion contained no choices".to_string())
        })?;

        debug!(
            finish_reason = %choice.finish_reason,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "Chat completion received"
        );

        if let Some(refusal) = choice.message.refusal {
            return Err(LLMError::UnexpectedResponse(format!(
                "Model refused the request: {refusal}"
            )));
        }

        Ok(CompletionResponse {
            message: Message::assistant(choice.message.content.unwrap_or_default()),
            stop_reason: stop_reason(&choice.finish_reason),
            usage: TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &str {
        "openai"
    }
}

fn status_error(status: StatusCode, body: String, model: String) -> LLMError {
    match status {
        StatusCode::UNAUTHORIZED => LLMError::AuthenticationFailed,
        StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimitExceeded(body),
        StatusCode::BAD_REQUEST => LLMError::InvalidRequest(body),
        StatusCode::NOT_FOUND => LLMError::ModelNotFound(model),
        _ => LLMError::RequestFailed(format!("HTTP {status}: {body}")),
    }
}

fn stop_reason(finish_reason: &str) -> StopReason {
    match finish_reason {
        "stop" => StopReason::EndTurn,
        "length" => StopReason::MaxTokens,
        "content_filter" => StopReason::ContentFilter,
        other => {
            warn!(finish_reason = other, "Unrecognised finish reason");
            StopReason::EndTurn
        }
    }
}

/// Chat Completions request and response bodies
mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub(super) struct ChatRequest {
        pub(super) model: String,
        pub(super) messages: Vec<ChatMessage>,
        pub(super) max_tokens: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub(super) temperature: Option<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub(super) response_format: Option<ResponseFormat>,
    }

    #[derive(Debug, Serialize)]
    pub(super) struct ChatMessage {
        pub(super) role: &'static str,
        pub(super) content: String,
    }

    #[derive(Debug, Serialize)]
    pub(super) struct ResponseFormat {
        #[serde(rename = "type")]
        pub(super) kind: &'static str,
        pub(super) json_schema: JsonSchema,
    }

    #[derive(Debug, Serialize)]
    pub(super) struct JsonSchema {
        pub(super) name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub(super) description: Option<String>,
        pub(super) schema: serde_json::Value,
        pub(super) strict: bool,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct ChatResponse {
        pub(super) choices: Vec<Choice>,
        pub(super) usage: Option<Usage>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct Choice {
        pub(super) message: ReplyMessage,
        #[serde(default)]
        pub(super) finish_reason: String,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct ReplyMessage {
        pub(super) content: Option<String>,
        #[serde(default)]
        pub(super) refusal: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub(super) struct Usage {
        #[serde(default)]
        pub(super) prompt_tokens: usize,
        #[serde(default)]
        pub(super) completion_tokens: usize,
    }
}
