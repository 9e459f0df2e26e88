//! The chat client: conversation history and the turn state machine.

pub mod worker;

use std::sync::{Arc, Mutex};

use futures::StreamExt;
use tracing::{debug, warn};

use crate::aggregate::{FinalResponse, ResponseAggregator};
use crate::config::DEFAULT_TEMPERATURE;
use crate::error::{NullBotError, Result};
use crate::persona;
use crate::provider::{ChatProvider, ChatRequest};
use crate::types::{ChatMessage, StreamEventType};

/// Where the client is within the current turn.
///
/// `Idle -> Sending -> Streaming -> Idle` on success; a failed turn
/// returns to `Idle` with the history rolled back one user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    Sending,
    Streaming,
}

/// Client for one conversation with the configured provider.
///
/// Owns the history exclusively. Interior mutability lets a single
/// instance sit behind an `Arc` and serve a worker task; the turn guard
/// still admits only one in-flight request.
pub struct ChatClient {
    provider: Arc<dyn ChatProvider>,
    temperature: f64,
    history: Mutex<Vec<ChatMessage>>,
    state: Mutex<TurnState>,
}

impl ChatClient {
    /// Client with the default sampling temperature.
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self::with_temperature(provider, DEFAULT_TEMPERATURE)
    }

    pub fn with_temperature(provider: Arc<dyn ChatProvider>, temperature: f64) -> Self {
        Self {
            provider,
            temperature,
            history: Mutex::new(vec![ChatMessage::system(persona::SYSTEM_PROMPT)]),
            state: Mutex::new(TurnState::Idle),
        }
    }

    /// Current turn state.
    pub fn state(&self) -> TurnState {
        *self.state.lock().unwrap()
    }

    /// Snapshot of the conversation history.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.history.lock().unwrap().clone()
    }

    /// Replace the history with the single persona system message.
    pub fn reset(&self) {
        let mut history = self.history.lock().unwrap();
        history.clear();
        history.push(ChatMessage::system(persona::SYSTEM_PROMPT));
        debug!("conversation reset");
    }

    /// Send one user turn, streaming fragments through `on_delta`.
    ///
    /// On success the assistant's reply (if non-empty) is appended to
    /// history and the finalized, prefix-stripped form is returned. On
    /// any failure the just-appended user message is popped so the
    /// history reverts to its pre-call state.
    pub async fn send<F>(&self, user_text: &str, on_delta: F) -> Result<FinalResponse>
    where
        F: FnMut(&str),
    {
        self.begin_turn()?;
        self.history
            .lock()
            .unwrap()
            .push(ChatMessage::user(user_text));

        let result = self.run_turn(on_delta).await;

        if result.is_err() {
            // Roll back the user message so a retry starts clean.
            let mut history = self.history.lock().unwrap();
            if history.last().map(|m| m.role) == Some(crate::types::Role::User) {
                history.pop();
            }
            warn!("turn failed, history rolled back");
        }

        self.set_state(TurnState::Idle);
        result
    }

    async fn run_turn<F>(&self, mut on_delta: F) -> Result<FinalResponse>
    where
        F: FnMut(&str),
    {
        let request = ChatRequest {
            messages: self.history(),
            temperature: self.temperature,
        };

        let mut stream = self.provider.stream_chat(&request).await?;
        self.set_state(TurnState::Streaming);

        let mut aggregator = ResponseAggregator::new();
        while let Some(item) = stream.next().await {
            let delta = item?;
            match delta.event_type {
                StreamEventType::TextDelta => {
                    if !delta.text.is_empty() {
                        aggregator.push(&delta.text);
                        on_delta(&delta.text);
                    }
                }
                StreamEventType::Done => break,
            }
        }

        // An empty completion leaves the history unchanged; a blank
        // assistant turn would only pollute the context.
        if !aggregator.is_empty() {
            self.history
                .lock()
                .unwrap()
                .push(ChatMessage::assistant(aggregator.raw()));
        }

        Ok(aggregator.finalize())
    }

    fn begin_turn(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if *state != TurnState::Idle {
            return Err(NullBotError::Busy);
        }
        *state = TurnState::Sending;
        Ok(())
    }

    fn set_state(&self, next: TurnState) {
        *self.state.lock().unwrap() = next;
    }
}
