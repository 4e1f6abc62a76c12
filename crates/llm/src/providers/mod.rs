//! LLM provider implementations.

pub mod chat_completions;
pub mod mock;

pub use chat_completions::ChatCompletionsClient;
pub use mock::{MockClient, MockFailure};
