//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod model_list;
pub mod say;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::model_list::list_models;
use crate::cli::say::run_say;
use crate::core::config::data::validate_temperature;
use crate::core::config::{Config, Settings, SettingsOverrides};
use crate::core::models::ModelSelection;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_tracing, LogTarget};

#[derive(Parser)]
#[command(name = "code-companion")]
#[command(version, about = "A terminal coding assistant backed by a local Ollama model")]
#[command(
    long_about = "Code Companion is a full-screen terminal chat interface for a DeepSeek \
coding model served by a local Ollama daemon. Each question is sent together with the \
whole conversation so far; the reply is shown once the model has finished.\n\n\
Configuration:\n\
  An optional config.toml in the platform config directory may set base_url,\n\
  temperature, default_model and theme. Flags override it.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a new line\n\
  Tab / Shift+Tab   Switch model\n\
  Left/Right/Home   Move the cursor in the input\n\
  Ctrl+L            Clear chat history\n\
  Ctrl+U            Clear the input field\n\
  Up/Down/PgUp/PgDn Scroll through chat history\n\
  End / Ctrl+End    End of input / jump back to the latest message\n\
  Esc / Ctrl+C      Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to start with (deepseek-r1:1.5b or deepseek-r1:3b)
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<ModelSelection>,

    /// Address of the Ollama server
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Sampling temperature
    #[arg(
        short = 't',
        long,
        global = true,
        value_name = "TEMPERATURE",
        value_parser = parse_temperature
    )]
    pub temperature: Option<f32>,

    /// Write diagnostic logs to this file
    #[arg(short = 'l', long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Ask a single question and print the answer
    Say {
        /// The question; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, required = true)]
        prompt: Vec<String>,
    },
    /// List the supported models and whether the server has them
    Models,
}

fn parse_temperature(value: &str) -> Result<f32, String> {
    let parsed = value
        .trim()
        .parse::<f32>()
        .map_err(|err| format!("invalid temperature '{value}': {err}"))?;
    validate_temperature(parsed)
}

impl Args {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            model: self.model,
        }
    }
}

fn resolve_settings(args: &Args) -> Result<Settings, Box<dyn Error>> {
    let config = Config::load(args.config.as_deref())?;
    Ok(config.resolve(&args.overrides())?)
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.clone().unwrap_or(Commands::Chat);

    let target = match command {
        Commands::Chat => LogTarget::Quiet,
        Commands::Say { .. } | Commands::Models => LogTarget::Stderr,
    };
    init_tracing(args.log_file.as_deref(), target)?;

    let settings = match resolve_settings(&args) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(2);
        }
    };

    match command {
        Commands::Chat => run_chat(settings).await,
        Commands::Say { prompt } => run_say(prompt, settings).await,
        Commands::Models => list_models(settings).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_chat() {
        let args = Args::try_parse_from(["code-companion"]).expect("parses");
        assert_eq!(args.command, None);
        assert_eq!(args.overrides(), SettingsOverrides::default());
    }

    #[test]
    fn say_collects_prompt_words() {
        let args = Args::try_parse_from(["code-companion", "say", "why", "does", "this", "panic?"])
            .expect("parses");
        assert_eq!(
            args.command,
            Some(Commands::Say {
                prompt: vec![
                    "why".to_string(),
                    "does".to_string(),
                    "this".to_string(),
                    "panic?".to_string()
                ]
            })
        );
    }

    #[test]
    fn global_flags_become_overrides() {
        let args = Args::try_parse_from([
            "code-companion",
            "models",
            "-m",
            "deepseek-r1:3b",
            "--base-url",
            "http://gpu-box:11434",
            "-t",
            "0.8",
        ])
        .expect("parses");
        let overrides = args.overrides();
        assert_eq!(overrides.model, Some(ModelSelection::DeepseekR1Medium));
        assert_eq!(overrides.base_url.as_deref(), Some("http://gpu-box:11434"));
        assert_eq!(overrides.temperature, Some(0.8));
    }

    #[test]
    fn models_outside_catalog_are_rejected() {
        assert!(Args::try_parse_from(["code-companion", "-m", "llama3:8b"]).is_err());
    }

    #[test]
    fn temperature_must_be_in_range() {
        assert!(Args::try_parse_from(["code-companion", "-t", "-1"]).is_err());
        assert!(Args::try_parse_from(["code-companion", "-t", "hot"]).is_err());
        assert!(Args::try_parse_from(["code-companion", "-t", "2.0"]).is_ok());
    }
}
