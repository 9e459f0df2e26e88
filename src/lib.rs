//! NullBot — streaming terminal chat client.
//!
//! Forwards user text to a hosted chat-completion endpoint, streams the
//! response incrementally, and renders it with the NullBot persona. The
//! core is the streaming/aggregation pipeline: accumulate partial deltas
//! from an SSE stream, surface them progressively, strip the persona's
//! response prefix, and finalize.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use nullbot::client::ChatClient;
//! use nullbot::config::AppConfig;
//! use nullbot::provider::create_provider;
//!
//! # async fn example() -> nullbot::error::Result<()> {
//! let config = AppConfig::default();
//! let provider = create_provider(&config, "sk-or-...".to_string());
//! let client = ChatClient::new(Arc::from(provider));
//! let reply = client.send("hello", |fragment| print!("{fragment}")).await?;
//! println!("{}", reply.display_text());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cli;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod persona;
pub mod provider;
pub mod types;
