//! Knowledge base command handler.

use crate::output;
use campus_core::{config::AppConfig, AppResult};
use campus_knowledge::KnowledgeStore;
use campus_prompt::list_prompts;
use clap::{Args, Subcommand};

/// Knowledge base inspection
#[derive(Args, Debug)]
pub struct KbCommand {
    #[command(subcommand)]
    pub action: KbAction,
}

#[derive(Subcommand, Debug)]
pub enum KbAction {
    /// Validate the knowledge base and show section counts
    Check(KbCheckCommand),
    /// List prompt overrides in the workspace
    Prompts,
}

/// Validate the knowledge base
#[derive(Args, Debug)]
pub struct KbCheckCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KbCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            KbAction::Check(cmd) => cmd.execute(config),
            KbAction::Prompts => {
                let prompts = list_prompts(&config.workspace)?;
                if prompts.is_empty() {
                    println!("No prompt overrides in {:?}", config.campus_dir().join("prompts"));
                }
                for id in prompts {
                    println!("{}", id);
                }
                Ok(())
            }
        }
    }
}

impl KbCheckCommand {
    fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Checking knowledge base");

        let path = config.knowledge_file();
        let stats = KnowledgeStore::load(&path)?.stats();

        if self.json {
            return output::print_json(&serde_json::json!({
                "path": path.display().to_string(),
                "stats": stats,
                "total": stats.total(),
            }));
        }

        println!("Knowledge base: {}", path.display());
        println!("  events:     {}", stats.events);
        println!("  schedules:  {}", stats.schedules);
        println!("  directions: {}", stats.directions);
        println!("  sports:     {}", stats.sports);
        Ok(())
    }
}
