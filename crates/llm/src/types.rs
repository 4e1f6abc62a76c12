//! Provider identifiers and their wire defaults.

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    Groq,
    OpenAI,
    Ollama,
    Mock,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "groq" => Some(Self::Groq),
            "openai" => Some(Self::OpenAI),
            "ollama" => Some(Self::Ollama),
            "mock" => Some(Self::Mock),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::OpenAI => "openai",
            Self::Ollama => "ollama",
            Self::Mock => "mock",
        }
    }

    /// Chat-completions URL used when none is configured.
    pub fn default_endpoint(&self) -> Option<&'static str> {
        match self {
            Self::Groq => Some("https://api.groq.com/openai/v1/chat/completions"),
            Self::OpenAI => Some("https://api.openai.com/v1/chat/completions"),
            Self::Ollama => Some("http://localhost:11434/v1/chat/completions"),
            Self::Mock => None,
        }
    }

    /// Whether requests must carry a bearer credential.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Groq | Self::OpenAI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(ProviderType::parse("groq"), Some(ProviderType::Groq));
        assert_eq!(ProviderType::parse("OpenAI"), Some(ProviderType::OpenAI));
        assert_eq!(ProviderType::parse("ollama"), Some(ProviderType::Ollama));
        assert_eq!(ProviderType::parse("mock"), Some(ProviderType::Mock));
        assert_eq!(ProviderType::parse("unknown"), None);
    }

    #[test]
    fn test_default_endpoints() {
        assert_eq!(
            ProviderType::Groq.default_endpoint(),
            Some("https://api.groq.com/openai/v1/chat/completions")
        );
        assert!(ProviderType::Mock.default_endpoint().is_none());
    }

    #[test]
    fn test_requires_api_key() {
        assert!(ProviderType::Groq.requires_api_key());
        assert!(ProviderType::OpenAI.requires_api_key());
        assert!(!ProviderType::Ollama.requires_api_key());
        assert!(!ProviderType::Mock.requires_api_key());
    }
}
