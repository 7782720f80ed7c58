// src/provider/registry.rs — Named model handles with capability checks

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Capability, ChatRequest, ChatResponse, Message, ModelProvider, ModelRef};
use crate::infra::errors::ProviderError;

/// Maps model names (e.g. "evaluator") to a model on one of the known providers.
#[derive(Default, Clone)]
pub struct ModelRegistry {
    providers: Vec<Arc<dyn ModelProvider>>,
    names: BTreeMap<String, ModelRef>,
}

impl ModelRegistry {
    pub fn new(providers: Vec<Arc<dyn ModelProvider>>) -> Self {
        Self {
            providers,
            names: BTreeMap::new(),
        }
    }

    pub fn add_provider(&mut self, provider: Arc<dyn ModelProvider>) {
        self.providers.push(provider);
    }

    /// Register (or replace) the model a name points at.
    pub fn register(&mut self, name: impl Into<String>, model_ref: ModelRef) {
        self.names.insert(name.into(), model_ref);
    }

    pub fn with_model(mut self, name: impl Into<String>, model_ref: ModelRef) -> Self {
        self.register(name, model_ref);
        self
    }

    /// Registered names with their model references, sorted by name.
    pub fn names(&self) -> impl Iterator<Item = (&str, &ModelRef)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    fn find_provider(&self, id: &str) -> Option<&Arc<dyn ModelProvider>> {
        self.providers.iter().find(|p| p.id() == id)
    }

    /// Resolve a registered name to a handle that supports `capability`.
    pub fn resolve(&self, name: &str, capability: Capability) -> Result<ChatModel, ProviderError> {
        let model_ref = self
            .names
            .get(name)
            .ok_or_else(|| ProviderError::ModelNotFound {
                name: name.to_string(),
            })?;

        let provider =
            self.find_provider(&model_ref.provider)
                .ok_or_else(|| ProviderError::ProviderUnavailable {
                    provider: model_ref.provider.clone(),
                })?;

        if !provider.supports(&model_ref.model, capability) {
            return Err(ProviderError::UnsupportedCapability {
                model: model_ref.to_string(),
                capability,
            });
        }

        tracing::debug!(name, model = %model_ref, "Resolved model");

        Ok(ChatModel {
            model_ref: model_ref.clone(),
            provider: Arc::clone(provider),
        })
    }
}

/// A resolved, chat-capable model.
#[derive(Clone)]
pub struct ChatModel {
    model_ref: ModelRef,
    provider: Arc<dyn ModelProvider>,
}

impl ChatModel {
    pub fn model_ref(&self) -> &ModelRef {
        &self.model_ref
    }

    /// Build a request for this model from an ordered list of turns.
    pub fn create_input(&self, messages: Vec<Message>) -> Result<ChatRequest, ProviderError> {
        if messages.is_empty() {
            return Err(ProviderError::InvalidInput(
                "at least one message is required".into(),
            ));
        }
        Ok(ChatRequest {
            model: self.model_ref.model.clone(),
            messages,
            max_tokens: None,
            temperature: None,
        })
    }

    pub async fn invoke(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        self.provider.chat(request).await
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("providers", &self.provider_ids())
            .field("names", &self.names)
            .finish()
    }
}

impl std::fmt::Debug for ChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatModel")
            .field("model_ref", &self.model_ref)
            .field("provider", &self.provider.id())
            .finish()
    }
}
