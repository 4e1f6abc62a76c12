//! Prompt types for the Campus Assistant.

use campus_llm::ChatMessage;
use serde::{Deserialize, Serialize};

/// Identifier of the built-in question-answering prompt.
pub const DEFAULT_PROMPT_ID: &str = "campus.ask.default";

const DEFAULT_SYSTEM: &str = "You are a helpful {{campus}} Campus Assistant Bot using {{campus}} data. \
Answer queries about events, schedules, sports, and directions.";

const DEFAULT_TEMPLATE: &str = "{{question}}\nHere is {{campus}} data:\n{{knowledge}}";

/// A prompt definition, built in or loaded from YAML.
///
/// Both `system` and `template` are Handlebars templates. Available
/// variables: `campus`, `question`, `knowledge` (the serialized snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Creator identifier
    #[serde(rename = "createdBy", default)]
    pub created_by: String,

    /// System message template
    pub system: String,

    /// User message template
    pub template: String,
}

impl Default for PromptDefinition {
    fn default() -> Self {
        Self {
            id: DEFAULT_PROMPT_ID.to_string(),
            title: "Campus question answering".to_string(),
            api_version: "1.0".to_string(),
            created_by: "campus".to_string(),
            system: DEFAULT_SYSTEM.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// A fully built prompt ready for the answer client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System instruction
    pub system: String,

    /// Question followed by the knowledge snapshot
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Size of the serialized knowledge snapshot
    #[serde(rename = "knowledgeBytes")]
    pub knowledge_bytes: usize,
}

impl BuiltPrompt {
    /// Consume the prompt into the `[system, user]` message pair.
    pub fn into_messages(self) -> Vec<ChatMessage> {
        vec![ChatMessage::system(self.system), ChatMessage::user(self.user)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_llm::Role;

    #[test]
    fn test_prompt_definition_deserialization() {
        let yaml = r#"
id: campus.ask.brief
title: Brief answers
apiVersion: "1.0"
createdBy: test
system: "You answer in one sentence about {{campus}}."
template: "{{question}}\n{{knowledge}}"
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.id, "campus.ask.brief");
        assert_eq!(def.created_by, "test");
        assert!(def.system.contains("{{campus}}"));
    }

    #[test]
    fn test_default_definition() {
        let def = PromptDefinition::default();
        assert_eq!(def.id, DEFAULT_PROMPT_ID);
        assert!(def.system.contains("events, schedules, sports, and directions"));
        assert!(def.template.starts_with("{{question}}\n"));
    }

    #[test]
    fn test_into_messages_order() {
        let built = BuiltPrompt {
            system: "sys".to_string(),
            user: "user".to_string(),
            metadata: BuiltPromptMetadata {
                source_prompt_id: DEFAULT_PROMPT_ID.to_string(),
                knowledge_bytes: 0,
            },
        };

        let messages = built.into_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "sys");
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "user");
    }
}
