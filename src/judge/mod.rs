// src/judge/mod.rs — Faithfulness judge backed by a chat model

pub mod parser;
pub mod prompt;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::infra::config::EVALUATOR_MODEL_NAME;
use crate::infra::errors::{JudgeError, ProviderError};
use crate::provider::registry::ModelRegistry;
use crate::provider::{Capability, Message};

pub const TEMPERATURE: f32 = 0.5;
pub const MAX_OUTPUT_TOKENS: u32 = 500;

/// Verdict from the judge model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// 1-5 by the rubric's convention; not range-checked.
    pub score: i64,
    pub reasoning: String,
}

/// Scores a task output for faithfulness to its input.
///
/// Stateless apart from the registry it resolves the judge model from, so
/// one instance can serve concurrent evaluations.
pub struct Evaluator {
    registry: Arc<ModelRegistry>,
}

impl Evaluator {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// Ask the judge model how faithful `output` is to `input`.
    ///
    /// Fails without a partial result if the model cannot be resolved, the
    /// call fails, the reply lacks either tagged block, or the score is not
    /// an integer. No retries and no timeout are applied here.
    pub async fn score_response(&self, input: &str, output: &str) -> Result<Evaluation, JudgeError> {
        let model = self
            .registry
            .resolve(EVALUATOR_MODEL_NAME, Capability::Chat)
            .map_err(JudgeError::ModelResolution)?;

        let user_prompt = prompt::render(input, output)?;

        let mut request = model
            .create_input(vec![
                Message::system(prompt::SYSTEM_PROMPT),
                Message::user(user_prompt),
            ])
            .map_err(JudgeError::Invocation)?;
        request.temperature = Some(TEMPERATURE);
        request.max_tokens = Some(MAX_OUTPUT_TOKENS);

        let response = model
            .invoke(request)
            .await
            .map_err(JudgeError::Invocation)?;

        let content = response
            .first_content()
            .ok_or(JudgeError::Invocation(ProviderError::EmptyResponse))?;

        parser::parse_reply(content)
    }
}
