//! Match command handler.
//!
//! Runs the content matcher on a question/answer pair without calling the
//! LLM. Useful for checking knowledge base keywords offline.

use crate::output;
use campus_core::{config::AppConfig, AppResult};
use campus_knowledge::{match_content, KnowledgeStore};
use clap::Args;

/// Show which images a question and answer would display
#[derive(Args, Debug)]
pub struct MatchCommand {
    /// Question text
    #[arg(short, long)]
    pub question: String,

    /// Answer text
    #[arg(short, long, default_value = "")]
    pub answer: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl MatchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing match command");

        let store = KnowledgeStore::load(&config.knowledge_file())?;
        let items = match_content(&self.question, &self.answer, &store);

        if self.json {
            output::print_json(&items)
        } else {
            output::print_items(&items);
            Ok(())
        }
    }
}
