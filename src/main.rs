// src/main.rs — faithjudge entry point

use clap::Parser;

use faithjudge::cli::{Cli, Commands};
use faithjudge::infra::config::{Config, EVALUATOR_MODEL_NAME};
use faithjudge::infra::logger;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    if let Some(model) = cli.model {
        config.set_model(EVALUATOR_MODEL_NAME, model);
    }

    match cli.command {
        Commands::Score { pair, json } => {
            faithjudge::cli::score::run_score(&config, &pair, json).await
        }
        Commands::Prompt { pair } => faithjudge::cli::prompt::run_prompt(&pair),
        Commands::Models => faithjudge::cli::models::run_models(&config),
    }
}
