//! Prompt command handler.
//!
//! Prints the messages that would be sent for a question. No network calls.

use crate::output;
use campus_core::{config::AppConfig, AppResult};
use campus_knowledge::KnowledgeStore;
use campus_prompt::{build_prompt, load_prompt_or_default, DEFAULT_PROMPT_ID};
use clap::Args;

/// Show the prompt sent to the LLM for a question
#[derive(Args, Debug)]
pub struct PromptCommand {
    /// The question (may be empty)
    #[arg(default_value = "")]
    pub question: String,

    /// Prompt definition to use
    #[arg(long, default_value = DEFAULT_PROMPT_ID)]
    pub prompt_id: String,

    /// Output the message list as JSON
    #[arg(long)]
    pub json: bool,
}

impl PromptCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing prompt command");

        let store = KnowledgeStore::load(&config.knowledge_file())?;
        let definition = load_prompt_or_default(&config.workspace, &self.prompt_id)?;
        let built = build_prompt(&definition, &self.question, &store, &config.campus_name)?;

        tracing::debug!(
            "Prompt {} carries {} bytes of knowledge",
            built.metadata.source_prompt_id,
            built.metadata.knowledge_bytes
        );

        let messages = built.into_messages();
        if self.json {
            return output::print_json(&messages);
        }

        for (i, message) in messages.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("[{}]", message.role.as_str());
            println!("{}", message.content);
        }

        Ok(())
    }
}
