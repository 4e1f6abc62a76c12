//! Prompt system for the Campus Assistant.
//!
//! This crate turns a question and the knowledge store into the
//! `[system, user]` message pair sent to the LLM:
//! - Built-in and YAML prompt definitions
//! - Handlebars template rendering
//! - Knowledge snapshot injection (events, schedules, directions, sports only)

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::{build_messages, build_prompt};
pub use loader::{list_prompts, load_prompt, load_prompt_or_default};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition, DEFAULT_PROMPT_ID};
