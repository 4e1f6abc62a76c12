//! Command handlers for the Campus Assistant CLI.

pub mod ask;
pub mod kb;
pub mod matches;
pub mod prompt;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use kb::KbCommand;
pub use matches::MatchCommand;
pub use prompt::PromptCommand;
