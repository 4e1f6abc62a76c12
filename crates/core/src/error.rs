//! Error types for the Campus Assistant.
//!
//! This module defines a unified error enum that covers every failure the
//! pipeline can produce: configuration, knowledge-base loading, the LLM call
//! (authentication, transport, malformed responses), prompt rendering and
//! serialization.

use thiserror::Error;

/// Unified error type for the Campus Assistant.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Knowledge base could not be loaded (fatal at startup)
    #[error("Knowledge base load error: {0}")]
    Load(String),

    /// Missing or rejected LLM credential
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Network failure or unexpected HTTP status from the LLM endpoint
    #[error("Transport error: {0}")]
    Transport(String),

    /// The LLM response lacked the expected choice/message structure
    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A failed query, wrapped for presentation to the end user
    #[error("Sorry, I could not answer that question: {0}")]
    Query(Box<AppError>),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Wrap a per-query failure for display to the end user.
    ///
    /// Already-wrapped errors are returned as they are.
    pub fn into_query_error(self) -> Self {
        match self {
            AppError::Query(_) => self,
            other => AppError::Query(Box::new(other)),
        }
    }

    /// Whether this failure belongs to a single query rather than the process.
    pub fn is_query_failure(&self) -> bool {
        matches!(
            self,
            AppError::Auth(_)
                | AppError::Transport(_)
                | AppError::MalformedResponse(_)
                | AppError::Prompt(_)
                | AppError::Query(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_query_error_wraps_once() {
        let err = AppError::Transport("connection refused".to_string()).into_query_error();
        assert!(matches!(err, AppError::Query(_)));

        let twice = err.into_query_error();
        match twice {
            AppError::Query(inner) => assert!(matches!(*inner, AppError::Transport(_))),
            other => panic!("Expected query error, got {:?}", other),
        }
    }

    #[test]
    fn test_query_error_message_includes_cause() {
        let err = AppError::Auth("missing API key".to_string()).into_query_error();
        let message = err.to_string();
        assert!(message.contains("could not answer"));
        assert!(message.contains("missing API key"));
    }

    #[test]
    fn test_query_failure_classification() {
        assert!(AppError::MalformedResponse("no choices".to_string()).is_query_failure());
        assert!(!AppError::Load("missing events".to_string()).is_query_failure());
        assert!(!AppError::Config("bad provider".to_string()).is_query_failure());
    }
}
