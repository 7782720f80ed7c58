// src/infra/errors.rs — Error types for faithjudge

use std::num::ParseIntError;

use thiserror::Error;

use crate::provider::Capability;

/// Failures raised by the model provider layer.
#[derive(Error, Debug)]
pub enum ProviderError {
    // Resolution errors
    #[error("No model registered under '{name}'")]
    ModelNotFound { name: String },

    #[error("Provider '{provider}' is not available (missing credentials or not configured)")]
    ProviderUnavailable { provider: String },

    #[error("Model '{model}' does not support {capability}")]
    UnsupportedCapability {
        model: String,
        capability: Capability,
    },

    // Invocation errors
    #[error("Invalid model input: {0}")]
    InvalidInput(String),

    #[error("Provider '{provider}' error: {message}")]
    Provider {
        provider: String,
        message: String,
        retriable: bool,
    },

    #[error("Rate limited by '{provider}', retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    #[error("Model returned no choices")]
    EmptyResponse,
}

impl ProviderError {
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ProviderError::Provider {
                retriable: true,
                ..
            } | ProviderError::RateLimited { .. }
        )
    }
}

/// Failures of a single evaluation, one variant per stage.
#[derive(Error, Debug)]
pub enum JudgeError {
    #[error("model resolution failed: {0}")]
    ModelResolution(#[source] ProviderError),

    #[error("prompt rendering failed: {0}")]
    Prompt(#[from] minijinja::Error),

    #[error("model invocation failed: {0}")]
    Invocation(#[source] ProviderError),

    #[error("invalid response format")]
    Format,

    #[error("invalid score: {0}")]
    Parse(#[from] ParseIntError),
}

impl JudgeError {
    /// True when the failure came from a transient provider condition.
    pub fn is_retriable(&self) -> bool {
        match self {
            JudgeError::Invocation(e) => e.is_retriable(),
            _ => false,
        }
    }
}
