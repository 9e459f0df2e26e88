//! Command-line surface for NullBot.

use clap::{Parser, Subcommand};

/// NullBot terminal chat client.
#[derive(Parser, Debug)]
#[command(name = "nullbot", version, about = "NullBot — streaming LLM chat for your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level CLI commands. No subcommand starts a chat session.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat(ChatArgs),
    /// Configure the API key
    Key,
    /// Show information about NullBot
    About,
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Provider to use (openrouter, deepseek, hugging-face, gemini)
    #[arg(short, long, default_value = "openrouter")]
    pub provider: String,

    /// Model identifier (defaults to the provider's model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(short, long)]
    pub temperature: Option<f64>,
}

impl Default for ChatArgs {
    /// Same values `nullbot chat` gets with no flags.
    fn default() -> Self {
        Self {
            provider: "openrouter".to_string(),
            model: None,
            temperature: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["nullbot"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn default_args_match_parsed_defaults() {
        let cli = Cli::try_parse_from(["nullbot", "chat"]).unwrap();
        let Some(Commands::Chat(parsed)) = cli.command else {
            panic!("expected Chat");
        };
        let defaults = ChatArgs::default();
        assert_eq!(parsed.provider, defaults.provider);
        assert_eq!(parsed.model, defaults.model);
        assert_eq!(parsed.temperature, defaults.temperature);
    }

    #[test]
    fn parse_chat_with_defaults() {
        let cli = Cli::try_parse_from(["nullbot", "chat"]).unwrap();
        match cli.command {
            Some(Commands::Chat(args)) => {
                assert_eq!(args.provider, "openrouter");
                assert!(args.model.is_none());
                assert!(args.temperature.is_none());
            }
            other => panic!("expected Chat, got {other:?}"),
        }
    }

    #[test]
    fn parse_chat_with_all_options() {
        let cli = Cli::try_parse_from([
            "nullbot",
            "chat",
            "-p",
            "deepseek",
            "-m",
            "deepseek-reasoner",
            "-t",
            "0.3",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Chat(args)) => {
                assert_eq!(args.provider, "deepseek");
                assert_eq!(args.model.as_deref(), Some("deepseek-reasoner"));
                assert!((args.temperature.unwrap() - 0.3).abs() < f64::EPSILON);
            }
            other => panic!("expected Chat, got {other:?}"),
        }
    }

    #[test]
    fn parse_key_subcommand() {
        let cli = Cli::try_parse_from(["nullbot", "key"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Key)));
    }

    #[test]
    fn parse_about_subcommand() {
        let cli = Cli::try_parse_from(["nullbot", "about"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::About)));
    }

    #[test]
    fn unknown_subcommand_is_error() {
        assert!(Cli::try_parse_from(["nullbot", "hack"]).is_err());
    }
}
