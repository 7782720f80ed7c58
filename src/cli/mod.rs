// src/cli/mod.rs — CLI definition (clap derive)

pub mod models;
pub mod prompt;
pub mod score;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "faithjudge",
    about = "Score an LLM output for faithfulness to its input",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Judge model in provider/model format (overrides [models].evaluator)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the judge model to score an output
    Score {
        #[command(flatten)]
        pair: PairArgs,

        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the rendered judge prompt without calling a model
    Prompt {
        #[command(flatten)]
        pair: PairArgs,
    },
    /// List configured model names and whether they resolve
    Models,
}

/// The (input, output) pair under evaluation.
#[derive(Args, Clone, Debug)]
pub struct PairArgs {
    /// Task input / context text
    #[arg(long, conflicts_with = "input_file", required_unless_present = "input_file")]
    pub input: Option<String>,

    /// Read the task input from a file ("-" for stdin)
    #[arg(long)]
    pub input_file: Option<PathBuf>,

    /// Output produced by the system under test
    #[arg(long, conflicts_with = "output_file", required_unless_present = "output_file")]
    pub output: Option<String>,

    /// Read the output from a file ("-" for stdin)
    #[arg(long)]
    pub output_file: Option<PathBuf>,
}

impl PairArgs {
    /// Resolve both sides to text, reading files or stdin as requested.
    pub fn read(&self) -> anyhow::Result<(String, String)> {
        let is_stdin = |p: &Option<PathBuf>| p.as_deref() == Some(Path::new("-"));
        if is_stdin(&self.input_file) && is_stdin(&self.output_file) {
            anyhow::bail!("--input-file and --output-file cannot both read stdin");
        }

        let input = read_text(self.input.as_deref(), self.input_file.as_deref(), "input")?;
        let output = read_text(self.output.as_deref(), self.output_file.as_deref(), "output")?;
        Ok((input, output))
    }
}

fn read_text(literal: Option<&str>, path: Option<&Path>, label: &str) -> anyhow::Result<String> {
    match (literal, path) {
        (Some(text), _) => Ok(text.to_string()),
        (None, Some(p)) if p == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| anyhow::anyhow!("Failed to read {label} from stdin: {e}"))?;
            Ok(buf)
        }
        (None, Some(p)) => std::fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("Failed to read {label} file {}: {e}", p.display())),
        (None, None) => anyhow::bail!("Missing --{label} or --{label}-file"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_score_literal() {
        let cli = Cli::try_parse_from([
            "faithjudge", "score", "--input", "ctx", "--output", "answer", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Score { pair, json } => {
                assert!(json);
                assert_eq!(pair.read().unwrap(), ("ctx".into(), "answer".into()));
            }
            _ => panic!("expected score"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "faithjudge", "models", "--model", "ollama/llama3.1", "--config", "/tmp/c.toml",
        ])
        .unwrap();
        assert_eq!(cli.model.as_deref(), Some("ollama/llama3.1"));
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.toml"));
        assert!(matches!(cli.command, Commands::Models));
    }

    #[test]
    fn test_input_required() {
        let result = Cli::try_parse_from(["faithjudge", "score", "--output", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_literal_and_file_conflict() {
        let result = Cli::try_parse_from([
            "faithjudge", "prompt", "--input", "a", "--input-file", "a.txt", "--output", "b",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_from_files() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "context\nwith lines").unwrap();
        let pair = PairArgs {
            input: None,
            input_file: Some(input.path().to_path_buf()),
            output: Some("out".into()),
            output_file: None,
        };
        let (i, o) = pair.read().unwrap();
        assert_eq!(i, "context\nwith lines");
        assert_eq!(o, "out");
    }

    #[test]
    fn test_missing_file_reports_label() {
        let pair = PairArgs {
            input: Some("in".into()),
            input_file: None,
            output: None,
            output_file: Some(PathBuf::from("/nonexistent/output.txt")),
        };
        let err = pair.read().unwrap_err();
        assert!(err.to_string().contains("output file"));
    }

    #[test]
    fn test_both_stdin_rejected() {
        let pair = PairArgs {
            input: None,
            input_file: Some(PathBuf::from("-")),
            output: None,
            output_file: Some(PathBuf::from("-")),
        };
        assert!(pair.read().is_err());
    }
}
