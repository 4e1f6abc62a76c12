//! Configuration management for the Campus Assistant.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (.campus/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources win. The configuration is workspace-centric: the knowledge
//! base path and prompt overrides are resolved against the workspace root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Providers the answer client knows how to talk to.
pub const KNOWN_PROVIDERS: [&str; 4] = ["groq", "openai", "ollama", "mock"];

/// Default chat model (Groq-hosted Llama 3 70B).
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Low sampling temperature keeps answers close to the grounding data.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Upper bound on a single LLM call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Knowledge base file, relative to the workspace.
pub const DEFAULT_KNOWLEDGE_FILE: &str = "campus_data.json";

/// Campus name used in the system prompt.
pub const DEFAULT_CAMPUS_NAME: &str = "KLNCE";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .campus/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider ("groq", "openai", "ollama", "mock")
    pub provider: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Custom chat-completions endpoint
    pub endpoint: Option<String>,

    /// Explicit API key (CAMPUS_API_KEY)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Name of the environment variable holding the provider key
    pub api_key_env: Option<String>,

    /// Sampling temperature
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Knowledge base file (relative paths resolve against the workspace)
    pub knowledge_path: PathBuf,

    /// Campus name injected into the prompt
    pub campus_name: String,

    /// Log level override
    pub log_level: Option<String>,

    /// Log output format ("text" or "json")
    pub log_format: String,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    knowledge: Option<KnowledgeSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    api_key_env: Option<String>,
    temperature: Option<f32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KnowledgeSection {
    path: Option<PathBuf>,
    campus_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    format: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "groq".to_string(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
            api_key: None,
            api_key_env: None,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            knowledge_path: PathBuf::from(DEFAULT_KNOWLEDGE_FILE),
            campus_name: DEFAULT_CAMPUS_NAME.to_string(),
            log_level: None,
            log_format: "text".to_string(),
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and environment.
    ///
    /// Environment variables:
    /// - `CAMPUS_WORKSPACE`: Override workspace path
    /// - `CAMPUS_CONFIG`: Path to config file
    /// - `CAMPUS_PROVIDER`: LLM provider
    /// - `CAMPUS_MODEL`: Model identifier
    /// - `CAMPUS_API_KEY`: API key (wins over the provider's key variable)
    /// - `CAMPUS_KNOWLEDGE`: Knowledge base file
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use campus_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Knowledge base: {:?}", config.knowledge_file());
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Load configuration with an explicit workspace and/or config file.
    ///
    /// Explicit arguments take precedence over `CAMPUS_WORKSPACE` and
    /// `CAMPUS_CONFIG`, so the YAML file is read from the right place.
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace.or_else(|| env_path("CAMPUS_WORKSPACE")) {
            config.workspace = workspace;
        }
        config.config_file = config_file.or_else(|| env_path("CAMPUS_CONFIG"));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.campus_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("CAMPUS_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("CAMPUS_MODEL") {
            config.model = model;
        }

        if let Some(path) = env_path("CAMPUS_KNOWLEDGE") {
            config.knowledge_path = path;
        }

        config.api_key = std::env::var("CAMPUS_API_KEY").ok();

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &Path) -> AppResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        self.apply_file(file);
        tracing::debug!("Merged config file {:?}", path);
        Ok(())
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(llm) = file.llm {
            if let Some(provider) = llm.provider {
                self.provider = provider;
            }
            if let Some(model) = llm.model {
                self.model = model;
            }
            if llm.endpoint.is_some() {
                self.endpoint = llm.endpoint;
            }
            if llm.api_key_env.is_some() {
                self.api_key_env = llm.api_key_env;
            }
            if let Some(temperature) = llm.temperature {
                self.temperature = temperature;
            }
            if let Some(timeout) = llm.timeout_secs {
                self.timeout_secs = timeout;
            }
        }

        if let Some(knowledge) = file.knowledge {
            if let Some(path) = knowledge.path {
                self.knowledge_path = path;
            }
            if let Some(name) = knowledge.campus_name {
                self.campus_name = name;
            }
        }

        if let Some(logging) = file.logging {
            if logging.level.is_some() {
                self.log_level = logging.level;
            }
            if let Some(format) = logging.format {
                self.log_format = format;
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the file.
    pub fn with_overrides(
        mut self,
        provider: Option<String>,
        model: Option<String>,
        knowledge_path: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(path) = knowledge_path {
            self.knowledge_path = path;
        }

        if verbose {
            self.verbose = true;
            // Verbose mode raises a level that came from the file or defaults
            self.log_level = Some("debug".to_string());
        }

        // An explicit level beats --verbose
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .campus directory.
    pub fn campus_dir(&self) -> PathBuf {
        self.workspace.join(".campus")
    }

    /// Knowledge base file, resolved against the workspace.
    pub fn knowledge_file(&self) -> PathBuf {
        if self.knowledge_path.is_absolute() {
            self.knowledge_path.clone()
        } else {
            self.workspace.join(&self.knowledge_path)
        }
    }

    /// Environment variable that holds the key for the active provider.
    pub fn api_key_var(&self) -> Option<String> {
        if let Some(ref var) = self.api_key_env {
            return Some(var.clone());
        }

        match self.provider.to_lowercase().as_str() {
            "groq" => Some("GROQ_API_KEY".to_string()),
            "openai" => Some("OPENAI_API_KEY".to_string()),
            _ => None,
        }
    }

    /// Resolve the API key: `CAMPUS_API_KEY` first, then the provider variable.
    ///
    /// A missing key is not an error here; the answer client reports it on
    /// the first call that needs it.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        self.api_key_var()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.provider.to_lowercase();
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model identifier cannot be empty".to_string()));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::Config(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Config("timeoutSecs must be greater than zero".to_string()));
        }

        Ok(())
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var(var).ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "groq");
        assert_eq!(config.model, "llama3-70b-8192");
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.campus_name, "KLNCE");
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_knowledge_file_resolves_against_workspace() {
        let mut config = AppConfig::default();
        config.workspace = PathBuf::from("/srv/campus");
        assert_eq!(
            config.knowledge_file(),
            PathBuf::from("/srv/campus/campus_data.json")
        );

        config.knowledge_path = PathBuf::from("/data/kb.yaml");
        assert_eq!(config.knowledge_file(), PathBuf::from("/data/kb.yaml"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some("ollama".to_string()),
            Some("llama3.2".to_string()),
            Some(PathBuf::from("other.json")),
            None,
            true,
            false,
        );

        assert_eq!(overridden.provider, "ollama");
        assert_eq!(overridden.model, "llama3.2");
        assert_eq!(overridden.knowledge_path, PathBuf::from("other.json"));
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_verbose_overrides_file_level() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "logging:\n  level: info\n").unwrap();

        let mut config = AppConfig::default();
        config.merge_yaml(&path).unwrap();
        assert_eq!(config.log_level, Some("info".to_string()));

        let config = config.with_overrides(None, None, None, None, true, false);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_explicit_level_beats_verbose() {
        let config = AppConfig::default().with_overrides(
            None,
            None,
            None,
            Some("campus_llm=trace".to_string()),
            true,
            false,
        );
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("campus_llm=trace".to_string()));
    }

    #[test]
    fn test_apply_yaml_file() {
        let yaml = r#"
llm:
  provider: openai
  model: gpt-4o-mini
  apiKeyEnv: MY_KEY
  temperature: 0.1
  timeoutSecs: 15
knowledge:
  path: data/campus.yaml
  campusName: Example Tech
logging:
  level: warn
  color: false
"#;
        let file: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        let mut config = AppConfig::default();
        config.apply_file(file);

        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_key_var(), Some("MY_KEY".to_string()));
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.knowledge_path, PathBuf::from("data/campus.yaml"));
        assert_eq!(config.campus_name, "Example Tech");
        assert_eq!(config.log_level, Some("warn".to_string()));
        assert!(config.no_color);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let file: ConfigFile = serde_yaml::from_str("knowledge:\n  campusName: Riverside\n").unwrap();
        let mut config = AppConfig::default();
        config.apply_file(file);

        assert_eq!(config.provider, "groq");
        assert_eq!(config.campus_name, "Riverside");
        assert_eq!(config.knowledge_path, PathBuf::from("campus_data.json"));
    }

    #[test]
    fn test_merge_yaml_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "llm:\n  provider: mock\n").unwrap();

        let mut config = AppConfig::default();
        config.merge_yaml(&path).unwrap();
        assert_eq!(config.provider, "mock");
    }

    #[test]
    fn test_merge_invalid_yaml_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "llm: [unclosed").unwrap();

        let mut config = AppConfig::default();
        assert!(matches!(config.merge_yaml(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn test_api_key_var_per_provider() {
        let mut config = AppConfig::default();
        assert_eq!(config.api_key_var(), Some("GROQ_API_KEY".to_string()));

        config.provider = "openai".to_string();
        assert_eq!(config.api_key_var(), Some("OPENAI_API_KEY".to_string()));

        config.provider = "ollama".to_string();
        assert_eq!(config.api_key_var(), None);
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let mut config = AppConfig::default();
        config.api_key = Some("explicit".to_string());
        assert_eq!(config.resolve_api_key(), Some("explicit".to_string()));
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = AppConfig::default();
        config.temperature = 3.5;
        assert!(config.validate().is_err());

        config.temperature = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_defaults() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
