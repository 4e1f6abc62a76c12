//! LLM integration crate for the Campus Assistant.
//!
//! This crate provides a provider-agnostic abstraction over chat-completion
//! endpoints and the [`AnswerClient`] that turns a built message list into
//! answer text.
//!
//! # Providers
//! - **Groq** (default), **OpenAI**, **Ollama**: any `/chat/completions` endpoint
//! - **Mock**: offline, deterministic
//!
//! # Example
//! ```no_run
//! use campus_llm::{create_client, AnswerClient, ChatMessage};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_client("groq", None, Some("gsk_..."), Duration::from_secs(60))?;
//! let answers = AnswerClient::new(client, "llama3-70b-8192");
//! let text = answers
//!     .ask(&[ChatMessage::system("You are helpful."), ChatMessage::user("Hello")])
//!     .await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

pub mod answer;
pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use answer::AnswerClient;
pub use client::{ChatMessage, ChatRequest, ChatResponse, LlmClient, LlmUsage, Role};
pub use factory::create_client;
pub use providers::{ChatCompletionsClient, MockClient, MockFailure};
pub use types::ProviderType;
