//! Mock LLM provider for offline runs and tests.

use crate::client::{ChatRequest, ChatResponse, LlmClient, LlmUsage, Role};
use campus_core::{AppError, AppResult};
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
enum MockReply {
    /// Repeat the first line of the user message
    Echo,
    /// Always return this text
    Fixed(String),
    /// Always fail
    Fail(MockFailure),
}

/// Failure the mock can simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Auth,
    Transport,
    MalformedResponse,
}

impl MockFailure {
    fn to_error(self) -> AppError {
        match self {
            Self::Auth => AppError::Auth("mock credential rejected".to_string()),
            Self::Transport => AppError::Transport("mock connection refused".to_string()),
            Self::MalformedResponse => {
                AppError::MalformedResponse("mock response contained no choices".to_string())
            }
        }
    }
}

/// Deterministic provider that never touches the network.
///
/// Every request is recorded so tests can assert on what was sent.
#[derive(Debug)]
pub struct MockClient {
    reply: MockReply,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockClient {
    /// Mock that echoes the question back.
    pub fn new() -> Self {
        Self::with_reply(MockReply::Echo)
    }

    /// Mock that always answers `answer`.
    pub fn answering(answer: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Fixed(answer.into()))
    }

    /// Mock that always fails with `failure`.
    pub fn failing(failure: MockFailure) -> Self {
        Self::with_reply(MockReply::Fail(failure))
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.requests.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    fn echo(request: &ChatRequest) -> String {
        let question = request
            .messages
            .iter()
            .find(|m| m.role == Role::User)
            .and_then(|m| m.content.lines().next())
            .unwrap_or_default();

        format!("(offline) You asked: {}", question)
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request.clone());
        }

        let content = match &self.reply {
            MockReply::Echo => Self::echo(request),
            MockReply::Fixed(answer) => answer.clone(),
            MockReply::Fail(failure) => return Err(failure.to_error()),
        };

        tracing::debug!("Mock provider answering {} bytes", content.len());

        Ok(ChatResponse {
            content,
            model: request.model.clone(),
            usage: LlmUsage::default(),
        })
    }
}
