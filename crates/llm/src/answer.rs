//! Answer client: one grounded question in, one answer string out.

use crate::client::{ChatMessage, ChatRequest, LlmClient};
use campus_core::config::DEFAULT_TEMPERATURE;
use campus_core::AppResult;
use std::sync::Arc;

/// Sends a built message list with a fixed model and temperature and returns
/// the first choice's text.
///
/// Exactly one provider call per `ask`. Errors are returned unchanged; there
/// is no retry and no fallback to an empty answer.
#[derive(Clone)]
pub struct AnswerClient {
    client: Arc<dyn LlmClient>,
    model: String,
    temperature: f32,
}

impl AnswerClient {
    /// Create an answer client using the default temperature (0.3).
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// Ask the LLM and return the answer text.
    pub async fn ask(&self, messages: &[ChatMessage]) -> AppResult<String> {
        let request =
            ChatRequest::new(self.model.clone(), messages.to_vec()).with_temperature(self.temperature);

        let response = self.client.complete(&request).await?;

        tracing::debug!(
            provider = self.client.provider_name(),
            model = %response.model,
            tokens = response.usage.total_tokens,
            "Answer received"
        );

        Ok(response.content)
    }
}

impl std::fmt::Debug for AnswerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerClient")
            .field("provider", &self.client.provider_name())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{MockClient, MockFailure};
    use campus_core::AppError;

    fn messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("You are a campus assistant."),
            ChatMessage::user("When is the Tech Fest?"),
        ]
    }

    #[tokio::test]
    async fn test_ask_sends_fixed_model_and_temperature() {
        let mock = Arc::new(MockClient::answering("Tech Fest is on Friday."));
        let answers = AnswerClient::new(mock.clone(), "llama3-70b-8192");

        let answer = answers.ask(&messages()).await.unwrap();
        assert_eq!(answer, "Tech Fest is on Friday.");

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].model, "llama3-70b-8192");
        assert_eq!(sent[0].temperature, Some(0.3));
        assert_eq!(sent[0].messages, messages());
    }

    #[tokio::test]
    async fn test_ask_propagates_malformed_response() {
        let mock = Arc::new(MockClient::failing(MockFailure::MalformedResponse));
        let answers = AnswerClient::new(mock.clone(), "m");

        let result = answers.ask(&messages()).await;
        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_ask_does_not_retry_transport_errors() {
        let mock = Arc::new(MockClient::failing(MockFailure::Transport));
        let answers = AnswerClient::new(mock.clone(), "m");

        assert!(matches!(
            answers.ask(&messages()).await,
            Err(AppError::Transport(_))
        ));
        assert_eq!(mock.calls(), 1);
    }

    #[test]
    fn test_with_temperature() {
        let answers = AnswerClient::new(Arc::new(MockClient::new()), "m").with_temperature(0.0);
        assert_eq!(answers.temperature, 0.0);
        assert_eq!(answers.provider_name(), "mock");
        assert_eq!(answers.model(), "m");
    }
}
