// src/cli/models.rs — `faithjudge models`

use crate::infra::config::Config;
use crate::provider::registry::ModelRegistry;
use crate::provider::{resolver, Capability};

pub fn run_models(config: &Config) -> anyhow::Result<()> {
    let registry = resolver::build_registry(config)?;
    for line in describe(&registry) {
        println!("{line}");
    }
    Ok(())
}

/// One line per registered name: name, model reference, resolution status.
pub fn describe(registry: &ModelRegistry) -> Vec<String> {
    let width = registry.names().map(|(n, _)| n.len()).max().unwrap_or(0);
    registry
        .names()
        .map(|(name, model_ref)| {
            let status = match registry.resolve(name, Capability::Chat) {
                Ok(_) => "ready".to_string(),
                Err(e) => format!("unavailable: {e}"),
            };
            format!("{name:<width$}  {model_ref}  {status}")
        })
        .collect()
}
