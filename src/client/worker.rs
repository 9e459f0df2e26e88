//! Worker-task turns for event-loop front ends.
//!
//! A graphical shell must not block its event loop on a completion, so
//! the turn runs on a spawned task and marshals updates back through a
//! channel the UI thread can drain.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::aggregate::FinalResponse;
use crate::client::ChatClient;

/// An update from an in-flight worker turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    /// Incremental text fragment.
    Delta(String),
    /// The turn finished; history has been updated.
    Completed(FinalResponse),
    /// The turn failed; history was rolled back. Carries the
    /// user-visible error text.
    Failed(String),
}

/// Spawn one turn on a background task.
///
/// Exactly one `Completed` or `Failed` event terminates the channel. If
/// the client is busy the turn fails immediately with the guard error.
pub fn spawn_turn(
    client: Arc<ChatClient>,
    user_text: String,
) -> mpsc::UnboundedReceiver<TurnEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let delta_tx = tx.clone();
        let result = client
            .send(&user_text, move |fragment| {
                let _ = delta_tx.send(TurnEvent::Delta(fragment.to_string()));
            })
            .await;

        let terminal = match result {
            Ok(response) => TurnEvent::Completed(response),
            Err(e) => TurnEvent::Failed(e.to_string()),
        };
        debug!(?terminal, "worker turn finished");
        let _ = tx.send(terminal);
    });

    rx
}
