//! NullBot binary entry point.

use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nullbot::aggregate::FinalResponse;
use nullbot::cli::{ChatArgs, Cli, Commands};
use nullbot::client::ChatClient;
use nullbot::config::AppConfig;
use nullbot::credentials::CredentialStore;
use nullbot::error::NullBotError;
use nullbot::provider::{create_provider, ChatProvider, Provider};

const BANNER: &str = r"
 _   _       _ _ ____        _
| \ | |_   _| | | __ )  ___ | |_
|  \| | | | | | |  _ \ / _ \| __|
| |\  | |_| | | | |_) | (_) | |_
|_| \_|\__,_|_|_|____/ \___/ \__|
";

const ABOUT: &str = "\
NullBot is a streaming terminal chat client for hosted LLM providers.

Features:
  - Streams completions from openrouter, deepseek, hugging-face, or gemini
  - Full conversational context and history per session
  - Stylized NullBot persona with Markdown-formatted replies

The API key lives in a local `.nullbot` file; run `nullbot key` to set it.
";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Key) => handle_key(),
        Some(Commands::About) => {
            println!("{BANNER}");
            println!("{ABOUT}");
            Ok(())
        }
        Some(Commands::Chat(args)) => handle_chat(args).await,
        None => handle_chat(ChatArgs::default()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn handle_key() -> Result<(), Box<dyn std::error::Error>> {
    let store = CredentialStore::new_default();
    configure_key(&store)?;
    Ok(())
}

async fn handle_chat(args: ChatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_from_args(&args)?;
    let store = CredentialStore::new(&config.credentials_path);

    let api_key = match setup_credentials(&store)? {
        Some(key) => key,
        None => {
            // Setup declined; the original aborts startup the same way.
            eprintln!("Cannot start without an API key.");
            std::process::exit(1);
        }
    };

    let provider = verified_provider(&config, &store, api_key).await?;

    run_chat_loop(&ChatClient::with_temperature(provider, config.temperature)).await
}

/// Verify the key, offering reconfiguration on rejection.
///
/// A rejected key prompts "Re-configure? (y/n)"; accepting saves a new
/// key and verifies again. Declining (or a non-auth failure) aborts.
async fn verified_provider(
    config: &AppConfig,
    store: &CredentialStore,
    mut api_key: String,
) -> Result<Arc<dyn ChatProvider>, Box<dyn std::error::Error>> {
    loop {
        let provider: Arc<dyn ChatProvider> =
            Arc::from(create_provider(config, api_key.clone()));

        println!("Verifying API key...");
        match provider.verify().await {
            Ok(()) => {
                println!("API key verified.");
                return Ok(provider);
            }
            Err(e) if e.is_auth_failure() => {
                eprintln!("The provided API key is invalid.");
                let answer = prompt("Re-configure? (y/n)")?;
                if !is_affirmative(&answer) {
                    return Err(e.into());
                }
                match configure_key(store)? {
                    Some(key) => api_key = key,
                    None => return Err(e.into()),
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn config_from_args(args: &ChatArgs) -> Result<AppConfig, NullBotError> {
    let provider = Provider::from_str(&args.provider).map_err(|_| {
        let supported = Provider::all()
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        NullBotError::Configuration(format!(
            "Unsupported provider '{}'. Supported values: {supported}",
            args.provider
        ))
    })?;

    let mut config = AppConfig::for_provider(provider);
    if let Some(ref model) = args.model {
        config.model = model.clone();
    }
    if let Some(temperature) = args.temperature {
        config.temperature = temperature;
    }
    Ok(config)
}

/// Load the API key, offering to configure one if missing.
///
/// Returns `None` when the user declines setup.
fn setup_credentials(store: &CredentialStore) -> Result<Option<String>, NullBotError> {
    if let Some(key) = store.load()? {
        return Ok(Some(key));
    }

    println!("API key (`sk-or-...`) not found.");
    let answer = prompt("Configure it now? (y/n)")?;
    if !is_affirmative(&answer) {
        return Ok(None);
    }

    configure_key(store)
}

/// Whether a y/n prompt answer counts as yes.
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

fn configure_key(store: &CredentialStore) -> Result<Option<String>, NullBotError> {
    let key = prompt("Paste your API key")?;
    if key.is_empty() {
        println!("No API key entered.");
        return Ok(None);
    }
    store.save(&key)?;
    println!("API key saved to {}.", store.path().display());
    Ok(Some(key))
}

async fn run_chat_loop(client: &ChatClient) -> Result<(), Box<dyn std::error::Error>> {
    println!("{BANNER}");
    println!("NullBot is online. Type '/help' for commands.\n");

    loop {
        let input = prompt("You")?;
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "/exit" => break,
            "/new" => {
                client.reset();
                println!("New chat session started.");
                continue;
            }
            "/help" => {
                println!("Commands:\n  /new  - Start a new conversation\n  /exit - Exit the chat");
                continue;
            }
            _ => {}
        }

        print!("NullBot is typing...");
        std::io::stdout().flush()?;

        let outcome = client.send(&input, |_| {}).await;

        // Clear the typing indicator before rendering the reply.
        print!("\r{:width$}\r", "", width = 24);
        std::io::stdout().flush()?;

        match outcome {
            Ok(FinalResponse::Reply(text)) => println!("NullBot: {text}\n"),
            Ok(FinalResponse::Empty) => {
                println!("NullBot: {}\n", FinalResponse::Empty.display_text())
            }
            Err(e) if e.is_auth_failure() => {
                eprintln!("API Error: authentication failed. Your API key is invalid.\n");
            }
            Err(e) => {
                eprintln!("API Error: an unexpected error occurred:\n{e}\n");
            }
        }
    }

    println!("Exiting...");
    Ok(())
}

fn prompt(label: &str) -> std::io::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers_are_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("YES"));
    }

    #[test]
    fn anything_else_declines() {
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn unknown_provider_names_the_supported_set() {
        let args = ChatArgs {
            provider: "skynet".into(),
            model: None,
            temperature: None,
        };
        let err = config_from_args(&args).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("skynet"));
        assert!(msg.contains("openrouter"));
        assert!(msg.contains("hugging-face"));
    }
}
