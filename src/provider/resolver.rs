// src/provider/resolver.rs — Build the model registry from config + environment

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use super::openai_compat::OpenAICompatProvider;
use super::registry::ModelRegistry;
use super::{ModelProvider, ModelRef};
use crate::infra::config::{Config, ProviderConfig};

/// Instantiate every usable provider and register every configured model name.
pub fn build_registry(config: &Config) -> anyhow::Result<ModelRegistry> {
    build_registry_with_env(config, |var| std::env::var(var).ok())
}

/// Same as [`build_registry`] with an explicit environment lookup.
pub fn build_registry_with_env(
    config: &Config,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ModelRegistry> {
    let mut registry = ModelRegistry::default();

    for (id, provider_cfg) in &config.providers {
        match instantiate(id, provider_cfg, &env)? {
            Some(provider) => registry.add_provider(provider),
            None => tracing::debug!(
                provider = %id,
                "Skipping provider: {} is not set",
                provider_cfg.api_key_env.as_deref().unwrap_or_default()
            ),
        }
    }

    for (name, reference) in &config.models {
        let model_ref = ModelRef::parse(reference).with_context(|| {
            format!("models.{name}: expected \"provider/model\", got \"{reference}\"")
        })?;
        registry.register(name.clone(), model_ref);
    }

    Ok(registry)
}

/// `Ok(None)` when the provider needs an API key that is not present.
fn instantiate(
    id: &str,
    cfg: &ProviderConfig,
    env: &impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Option<Arc<dyn ModelProvider>>> {
    let api_key = match &cfg.api_key_env {
        Some(var) => match env(var).filter(|k| !k.trim().is_empty()) {
            Some(key) => Some(key),
            None => return Ok(None),
        },
        None => None,
    };

    let provider = OpenAICompatProvider::new(
        id,
        display_name(id),
        api_key,
        cfg.base_url.clone(),
        cfg.timeout_seconds.map(Duration::from_secs),
    )?;
    Ok(Some(Arc::new(provider)))
}

fn display_name(id: &str) -> String {
    match id {
        "openai" => "OpenAI".into(),
        "ollama" => "Ollama".into(),
        "groq" => "Groq".into(),
        "openrouter" => "OpenRouter".into(),
        other => other.to_string(),
    }
}
