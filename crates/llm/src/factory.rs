//! LLM provider factory.
//!
//! Creates the client for the configured provider. Credentials are passed
//! through untouched: a missing key surfaces as an auth error on the first
//! call, not here.

use crate::client::LlmClient;
use crate::providers::{ChatCompletionsClient, MockClient};
use crate::types::ProviderType;
use campus_core::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("groq", "openai", "ollama", "mock")
/// * `endpoint` - Optional custom chat-completions URL
/// * `api_key` - Optional bearer credential
/// * `timeout` - Upper bound for a single request
///
/// # Errors
/// Returns `AppError::Config` if the provider is unknown or the HTTP client
/// cannot be built.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout: Duration,
) -> AppResult<Arc<dyn LlmClient>> {
    let provider_type = ProviderType::parse(provider)
        .ok_or_else(|| AppError::Config(format!("Unknown provider: {}", provider)))?;

    if provider_type == ProviderType::Mock {
        tracing::warn!("Using the offline mock provider; answers are not generated");
        return Ok(Arc::new(MockClient::new()));
    }

    let url = endpoint
        .or_else(|| provider_type.default_endpoint())
        .ok_or_else(|| {
            AppError::Config(format!("No endpoint configured for provider: {}", provider))
        })?;

    tracing::debug!("Creating {} client for {}", provider_type.as_str(), url);

    let client = ChatCompletionsClient::new(
        provider_type,
        url,
        api_key.map(str::to_string),
        timeout,
    )?;

    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn test_create_groq_client_without_key() {
        let client = create_client("groq", None, None, TIMEOUT).unwrap();
        assert_eq!(client.provider_name(), "groq");
    }

    #[test]
    fn test_create_ollama_with_custom_endpoint() {
        let client = create_client(
            "ollama",
            Some("http://localhost:8080/v1/chat/completions"),
            None,
            TIMEOUT,
        )
        .unwrap();
        assert_eq!(client.provider_name(), "ollama");
    }

    #[test]
    fn test_create_mock_client() {
        let client = create_client("MOCK", None, None, TIMEOUT).unwrap();
        assert_eq!(client.provider_name(), "mock");
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, None, TIMEOUT) {
            Err(AppError::Config(msg)) => assert!(msg.contains("Unknown provider")),
            Err(other) => panic!("Expected config error, got {:?}", other),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
