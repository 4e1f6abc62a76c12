//! Query orchestration: prompt → answer → display items.

use campus_core::{config::AppConfig, AppResult};
use campus_knowledge::{match_content, DisplayItem, KnowledgeStore};
use campus_llm::{create_client, AnswerClient};
use campus_prompt::{build_prompt, load_prompt_or_default, PromptDefinition};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Result of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    /// Answer text from the LLM
    pub answer: String,

    /// Images matched in the question and answer
    pub items: Vec<DisplayItem>,
}

/// Runs one query/response cycle against a shared knowledge store.
#[derive(Debug, Clone)]
pub struct Assistant {
    store: Arc<KnowledgeStore>,
    prompt: PromptDefinition,
    campus_name: String,
    answers: AnswerClient,
}

impl Assistant {
    /// Create an assistant with the built-in prompt and campus name.
    pub fn new(store: Arc<KnowledgeStore>, answers: AnswerClient) -> Self {
        Self {
            store,
            prompt: PromptDefinition::default(),
            campus_name: campus_core::config::DEFAULT_CAMPUS_NAME.to_string(),
            answers,
        }
    }

    /// Use a different prompt definition and campus name.
    pub fn with_prompt(mut self, prompt: PromptDefinition, campus_name: impl Into<String>) -> Self {
        self.prompt = prompt;
        self.campus_name = campus_name.into();
        self
    }

    /// Wire up store, prompt and LLM client from configuration.
    ///
    /// Fails fast if the knowledge base cannot be loaded. A missing API key
    /// is not checked here; it surfaces on the first question.
    pub fn from_config(config: &AppConfig, prompt_id: &str) -> AppResult<Self> {
        let store = Arc::new(KnowledgeStore::load(&config.knowledge_file())?);
        let prompt = load_prompt_or_default(&config.workspace, prompt_id)?;

        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            if let Some(var) = config.api_key_var() {
                tracing::debug!("No API key found in {}", var);
            }
        }

        let client = create_client(
            &config.provider,
            config.endpoint.as_deref(),
            api_key.as_deref(),
            Duration::from_secs(config.timeout_secs),
        )?;

        let answers = AnswerClient::new(client, &config.model).with_temperature(config.temperature);
        tracing::debug!(
            provider = answers.provider_name(),
            model = answers.model(),
            "Answer client ready"
        );

        Ok(Self::new(store, answers).with_prompt(prompt, &config.campus_name))
    }

    pub fn campus_name(&self) -> &str {
        &self.campus_name
    }

    /// Answer one question.
    ///
    /// Stages run in order and the first failure is returned unchanged;
    /// there is no partial result.
    #[tracing::instrument(skip_all, fields(question_len = question.len()))]
    pub async fn handle(&self, question: &str) -> AppResult<Answer> {
        let messages = build_prompt(&self.prompt, question, &self.store, &self.campus_name)?
            .into_messages();

        let answer = self.answers.ask(&messages).await?;
        let items = match_content(question, &answer, &self.store);

        tracing::info!(
            answer_len = answer.len(),
            items = items.len(),
            "Question answered"
        );

        Ok(Answer { answer, items })
    }
}
