use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub const DEFAULT_RECURSION_LIMIT: u32 = 100;

const AFTER_HELP: &str = r#"Examples:
  autocoder
  autocoder --recursion-limit 150
  autocoder -p "Create a calculator web application"

Example prompts:
  - Build a modern todo list app with HTML, CSS, and JavaScript
  - Create a calculator web application
  - Develop a blog API using FastAPI with SQLite"#;

/// Autocoder CLI definition.
#[derive(Debug, Parser)]
#[command(name = "autocoder")]
#[command(
    about = "AI Coding Agent - Transform natural language into code",
    version,
    after_help = AFTER_HELP
)]
pub struct Cli {
    #[arg(
        short = 'r',
        long,
        default_value_t = DEFAULT_RECURSION_LIMIT,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Recursion limit for agent processing"
    )]
    pub recursion_limit: u32,

    #[arg(
        short = 'p',
        long,
        help = "Project prompt (optional, will prompt if not provided)"
    )]
    pub prompt: Option<String>,

    #[arg(long, help = "Path to a YAML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Directory that receives generated files (defaults to ./generated_project)"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        help = "LLM provider backend (overrides the config file)"
    )]
    pub llm_provider: Option<LlmProvider>,

    #[arg(long, help = "Model identifier (overrides the config file)")]
    pub llm_model: Option<String>,

    #[arg(short, long, help = "Enable verbose logging with timestamps")]
    pub verbose: bool,

    #[arg(long, help = "Emit console logs as JSON")]
    pub log_json: bool,
}

/// Supported LLM providers surfaced via the CLI.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default, serde::Deserialize)]
#[clap(rename_all = "lower")]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Groq,
    Openai,
    Anthropic,
}

impl LlmProvider {
    pub fn env_var(self) -> &'static str {
        match self {
            LlmProvider::Groq => "GROQ_API_KEY",
            LlmProvider::Openai => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LlmProvider::Groq => "groq",
            LlmProvider::Openai => "openai",
            LlmProvider::Anthropic => "anthropic",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Groq => "openai/gpt-oss-120b",
            LlmProvider::Openai => "gpt-4o-mini",
            LlmProvider::Anthropic => "claude-sonnet-4-5",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_recursion_limit_to_one_hundred() {
        let cli = Cli::parse_from(["autocoder"]);
        assert_eq!(cli.recursion_limit, 100);
        assert!(cli.prompt.is_none());
        assert!(cli.llm_provider.is_none());
    }

    #[test]
    fn parses_short_flags() {
        let cli = Cli::parse_from(["autocoder", "-r", "5", "-p", "Build X"]);
        assert_eq!(cli.recursion_limit, 5);
        assert_eq!(cli.prompt.as_deref(), Some("Build X"));
    }

    #[test]
    fn rejects_zero_recursion_limit() {
        let err = Cli::try_parse_from(["autocoder", "--recursion-limit", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn parses_provider_override() {
        let cli = Cli::parse_from([
            "autocoder",
            "--llm-provider",
            "anthropic",
            "--llm-model",
            "claude-haiku",
        ]);
        assert_eq!(cli.llm_provider, Some(LlmProvider::Anthropic));
        assert_eq!(cli.llm_model.as_deref(), Some("claude-haiku"));
    }
}
