// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::infra::paths;

/// Name the evaluator resolves its judge model under.
pub const EVALUATOR_MODEL_NAME: &str = "evaluator";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model name -> "provider/model".
    #[serde(default = "default_models")]
    pub models: BTreeMap<String, String>,

    #[serde(default = "default_providers")]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models: default_models(),
            providers: default_providers(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Environment variable holding the API key. `None` means no key is needed.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Transport timeout for a single request.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_models() -> BTreeMap<String, String> {
    BTreeMap::from([(
        EVALUATOR_MODEL_NAME.to_string(),
        "openai/gpt-4.1-mini".to_string(),
    )])
}

fn default_providers() -> BTreeMap<String, ProviderConfig> {
    BTreeMap::from([
        (
            "openai".to_string(),
            ProviderConfig {
                base_url: "https://api.openai.com/v1".into(),
                api_key_env: Some("OPENAI_API_KEY".into()),
                timeout_seconds: None,
            },
        ),
        (
            "ollama".to_string(),
            ProviderConfig {
                base_url: "http://localhost:11434/v1".into(),
                api_key_env: None,
                timeout_seconds: None,
            },
        ),
    ])
}

impl Config {
    /// Load config from the default file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        match paths::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Point a model name at a different "provider/model" reference.
    pub fn set_model(&mut self, name: impl Into<String>, model_ref: impl Into<String>) {
        self.models.insert(name.into(), model_ref.into());
    }
}
