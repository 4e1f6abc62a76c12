//! Prompt builder: renders the system instruction and the grounded user
//! message.

use crate::types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
use campus_core::config::DEFAULT_CAMPUS_NAME;
use campus_core::{AppError, AppResult};
use campus_knowledge::KnowledgeStore;
use campus_llm::ChatMessage;
use handlebars::Handlebars;
use std::collections::BTreeMap;

/// Build the `[system, user]` messages with the built-in prompt.
///
/// The question is opaque: it is neither validated nor truncated, and may be
/// empty.
///
/// # Example
/// ```
/// use campus_knowledge::KnowledgeStore;
/// use campus_prompt::build_messages;
///
/// let store = KnowledgeStore::from_json_str(
///     r#"{"events": [], "schedules": {}, "directions": {}, "sports": {}}"#,
/// ).unwrap();
///
/// let messages = build_messages("Where is the library?", &store).unwrap();
/// assert_eq!(messages.len(), 2);
/// ```
pub fn build_messages(question: &str, store: &KnowledgeStore) -> AppResult<Vec<ChatMessage>> {
    let built = build_prompt(
        &PromptDefinition::default(),
        question,
        store,
        DEFAULT_CAMPUS_NAME,
    )?;
    Ok(built.into_messages())
}

/// Build a prompt from a definition.
///
/// This function:
/// 1. Serializes exactly the four knowledge sections from the store
/// 2. Renders the system and user templates with `campus`, `question` and
///    `knowledge`
/// 3. Returns a `BuiltPrompt` ready for the answer client
pub fn build_prompt(
    definition: &PromptDefinition,
    question: &str,
    store: &KnowledgeStore,
    campus_name: &str,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let knowledge = store.snapshot_json()?;

    let mut variables = BTreeMap::new();
    variables.insert("campus", campus_name);
    variables.insert("question", question);
    variables.insert("knowledge", knowledge.as_str());

    let renderer = renderer(definition)?;
    let system = render(&renderer, "system", &variables)?;
    let user = render(&renderer, "user", &variables)?;

    tracing::debug!(
        "Built prompt - question: {} bytes, knowledge: {} bytes",
        question.len(),
        knowledge.len()
    );

    Ok(BuiltPrompt {
        system,
        user,
        metadata: BuiltPromptMetadata {
            source_prompt_id: definition.id.clone(),
            knowledge_bytes: knowledge.len(),
        },
    })
}

/// Register both templates of a definition.
fn renderer(definition: &PromptDefinition) -> AppResult<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();

    // Plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("system", &definition.system)
        .map_err(|e| AppError::Prompt(format!("Failed to register system template: {}", e)))?;

    handlebars
        .register_template_string("user", &definition.template)
        .map_err(|e| AppError::Prompt(format!("Failed to register user template: {}", e)))?;

    Ok(handlebars)
}

fn render(
    handlebars: &Handlebars<'_>,
    name: &str,
    variables: &BTreeMap<&str, &str>,
) -> AppResult<String> {
    handlebars
        .render(name, variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render {} template: {}", name, e)))
}
