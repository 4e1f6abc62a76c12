//! Chat-completions provider.
//!
//! Talks to any endpoint implementing the OpenAI `/chat/completions` API:
//! Groq (default), OpenAI, and Ollama's OpenAI-compatible route.

use crate::client::{ChatRequest, ChatResponse, LlmClient, LlmUsage};
use crate::types::ProviderType;
use campus_core::{AppError, AppResult};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Client for a single chat-completions endpoint.
///
/// Built once at startup; `reqwest::Client` is reference counted internally
/// so the provider is cheap to share.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    provider: ProviderType,

    /// Full chat-completions URL
    endpoint: String,

    /// Bearer credential; checked on first use, not at construction
    api_key: Option<String>,

    timeout: Duration,

    client: reqwest::Client,
}

/// Response body of a chat-completions call.
#[derive(Debug, Deserialize)]
struct CompletionBody {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<UsageBody>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageBody {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: Option<u32>,
}

/// Error envelope used by OpenAI-compatible APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ChatCompletionsClient {
    /// Create a client for `provider` at `endpoint`.
    pub fn new(
        provider: ProviderType,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            provider,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            timeout,
            client,
        })
    }

    fn credential(&self) -> AppResult<Option<&str>> {
        match self.api_key.as_deref() {
            Some(key) => Ok(Some(key)),
            None if self.provider.requires_api_key() => Err(AppError::Auth(format!(
                "No API key configured for provider '{}'",
                self.provider.as_str()
            ))),
            None => Ok(None),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::Transport(format!(
                "Request to {} timed out after {}s",
                self.endpoint,
                self.timeout.as_secs()
            ))
        } else {
            AppError::Transport(format!("Failed to reach {}: {}", self.endpoint, err))
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for ChatCompletionsClient {
    fn provider_name(&self) -> &str {
        self.provider.as_str()
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        let api_key = self.credential()?;

        tracing::info!(
            provider = self.provider.as_str(),
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let err = status_error(status, &body);
            tracing::error!(%status, "Chat completion failed: {}", err);
            return Err(err);
        }

        let parsed = parse_completion(&body, &request.model)?;

        tracing::info!("Received chat completion");
        tracing::debug!(
            "Token usage - Prompt: {}, Completion: {}, Total: {}",
            parsed.usage.prompt_tokens,
            parsed.usage.completion_tokens,
            parsed.usage.total_tokens
        );

        Ok(parsed)
    }
}

/// Map a non-success HTTP status to an error.
///
/// 401 and 403 mean the credential was rejected; everything else is a
/// transport-level failure from the caller's point of view.
fn status_error(status: StatusCode, body: &str) -> AppError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|env| env.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::Auth(format!("Credential rejected (HTTP {}): {}", status, detail))
        }
        _ => AppError::Transport(format!("HTTP {}: {}", status, detail)),
    }
}

/// Extract the first choice's message content from a response body.
pub(crate) fn parse_completion(body: &str, requested_model: &str) -> AppResult<ChatResponse> {
    let parsed: CompletionBody = serde_json::from_str(body).map_err(|e| {
        AppError::MalformedResponse(format!("Response body is not a completion: {}", e))
    })?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AppError::MalformedResponse("Response contained no choices".to_string()))?
        .message
        .ok_or_else(|| AppError::MalformedResponse("First choice has no message".to_string()))?
        .content
        .ok_or_else(|| {
            AppError::MalformedResponse("First choice message has no content".to_string())
        })?;

    let usage = parsed
        .usage
        .map(|u| {
            let mut usage = LlmUsage::new(u.prompt_tokens, u.completion_tokens);
            if let Some(total) = u.total_tokens {
                usage.total_tokens = total;
            }
            usage
        })
        .unwrap_or_default();

    Ok(ChatResponse {
        content,
        model: parsed.model.unwrap_or_else(|| requested_model.to_string()),
        usage,
    })
}
