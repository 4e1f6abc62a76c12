//! Ask command handler.
//!
//! Answers one question, or runs an interactive session reading one question
//! per line from stdin.

use crate::assistant::Assistant;
use crate::output;
use campus_core::{config::AppConfig, AppError, AppResult};
use campus_prompt::DEFAULT_PROMPT_ID;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Ask a question about the campus
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask (omit for an interactive session)
    pub question: Option<String>,

    /// Read the question from a file
    #[arg(short, long, conflicts_with = "question")]
    pub file: Option<PathBuf>,

    /// Prompt definition to use
    #[arg(long, default_value = DEFAULT_PROMPT_ID)]
    pub prompt_id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let assistant = Assistant::from_config(config, &self.prompt_id)?;

        match self.get_question()? {
            Some(question) => {
                let answer = assistant
                    .handle(&question)
                    .await
                    .map_err(AppError::into_query_error)?;
                output::print_answer(&answer, self.json)
            }
            None => self.interactive(&assistant).await,
        }
    }

    /// Answer questions from stdin until EOF or `exit`.
    ///
    /// A failed question is reported and the session continues.
    async fn interactive(&self, assistant: &Assistant) -> AppResult<()> {
        println!(
            "Ask me anything about {} (type 'exit' to quit).",
            assistant.campus_name()
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if matches!(question, "exit" | "quit") {
                break;
            }

            match assistant.handle(question).await {
                Ok(answer) => output::print_answer(&answer, self.json)?,
                Err(e) if e.is_query_failure() => {
                    tracing::warn!("Question failed: {}", e);
                    eprintln!("{}", e.into_query_error());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Get the question from the argument or the file.
    fn get_question(&self) -> AppResult<Option<String>> {
        if let Some(ref question) = self.question {
            return Ok(Some(question.clone()));
        }

        match self.file {
            Some(ref path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Config(format!("Failed to read question file {:?}: {}", path, e))
                })?;
                Ok(Some(content.trim_end().to_string()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(question: Option<&str>, file: Option<PathBuf>) -> AskCommand {
        AskCommand {
            question: question.map(str::to_string),
            file,
            prompt_id: DEFAULT_PROMPT_ID.to_string(),
            json: false,
        }
    }

    #[test]
    fn test_question_argument() {
        let cmd = command(Some("Where is the library?"), None);
        assert_eq!(
            cmd.get_question().unwrap(),
            Some("Where is the library?".to_string())
        );
    }

    #[test]
    fn test_question_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("q.txt");
        std::fs::write(&path, "When is the Tech Fest?\n").unwrap();

        let cmd = command(None, Some(path));
        assert_eq!(
            cmd.get_question().unwrap(),
            Some("When is the Tech Fest?".to_string())
        );
    }

    #[test]
    fn test_no_question_means_interactive() {
        assert_eq!(command(None, None).get_question().unwrap(), None);
    }

    #[test]
    fn test_missing_file_is_error() {
        let cmd = command(None, Some(PathBuf::from("/nonexistent/q.txt")));
        assert!(cmd.get_question().is_err());
    }
}
