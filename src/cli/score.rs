// src/cli/score.rs — `faithjudge score`

use std::sync::Arc;

use super::PairArgs;
use crate::infra::config::Config;
use crate::judge::{Evaluation, Evaluator};
use crate::provider::resolver;

pub async fn run_score(config: &Config, pair: &PairArgs, json: bool) -> anyhow::Result<()> {
    let (input, output) = pair.read()?;

    let registry = Arc::new(resolver::build_registry(config)?);
    let evaluator = Evaluator::new(registry);

    let eval = match evaluator.score_response(&input, &output).await {
        Ok(eval) => eval,
        Err(e) => {
            if e.is_retriable() {
                tracing::warn!("Provider failure looks transient; retrying may succeed");
            }
            return Err(e.into());
        }
    };

    println!("{}", render(&eval, json)?);
    Ok(())
}

fn render(eval: &Evaluation, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(eval)?)
    } else {
        Ok(format!("Score: {}/5\n\n{}", eval.score, eval.reasoning))
    }
}
