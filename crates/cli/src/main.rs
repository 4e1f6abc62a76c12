//! Campus Assistant CLI
//!
//! Main entry point for the `campus` command-line tool: answers questions
//! about the campus grounded in the knowledge base and lists matching images.

mod assistant;
mod commands;
mod output;

use campus_core::logging::{self, LogFormat};
use campus_core::{config::AppConfig, AppError, AppResult};
use clap::{Parser, Subcommand};
use commands::{AskCommand, KbCommand, MatchCommand, PromptCommand};
use std::path::PathBuf;

/// Campus Assistant - grounded answers about campus events, schedules,
/// directions and sports
#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(about = "Grounded answers about campus events, schedules, directions and sports", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "CAMPUS_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "CAMPUS_CONFIG")]
    config: Option<PathBuf>,

    /// Knowledge base file (JSON or YAML)
    #[arg(long, global = true, env = "CAMPUS_KNOWLEDGE")]
    knowledge: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// LLM provider (groq, openai, ollama, mock)
    #[arg(short, long, global = true, env = "CAMPUS_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "CAMPUS_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a question (interactive when no question is given)
    Ask(AskCommand),

    /// Show images matched by a question and answer, without the LLM
    Match(MatchCommand),

    /// Show the prompt that would be sent for a question
    Prompt(PromptCommand),

    /// Knowledge base inspection
    Kb(KbCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}", error_message(&e));
        std::process::exit(1);
    }
}

/// User-facing rendering of a failure that ended the command.
fn error_message(err: &AppError) -> String {
    match err {
        AppError::Query(_) => err.to_string(),
        other => format!("error: {}", other),
    }
}

async fn run() -> AppResult<()> {
    // .env is optional; real environment variables win
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.workspace, cli.config)?.with_overrides(
        cli.provider,
        cli.model,
        cli.knowledge,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    let log_format = LogFormat::parse(&config.log_format).unwrap_or_default();
    logging::init_logging(config.log_level.as_deref(), log_format, config.no_color)?;

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    tracing::info!("Campus Assistant starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Match(_) => "match",
        Commands::Prompt(_) => "prompt",
        Commands::Kb(_) => "kb",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Match(cmd) => cmd.execute(&config).await,
        Commands::Prompt(cmd) => cmd.execute(&config).await,
        Commands::Kb(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
