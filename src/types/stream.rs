//! Streaming types.

use serde::{Deserialize, Serialize};

/// A delta emitted while a completion streams in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatDelta {
    /// The incremental text fragment.
    pub text: String,
    /// Event type.
    pub event_type: StreamEventType,
}

impl ChatDelta {
    /// An incremental text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            event_type: StreamEventType::TextDelta,
        }
    }

    /// The terminal delta for a stream.
    pub fn done() -> Self {
        Self {
            text: String::new(),
            event_type: StreamEventType::Done,
        }
    }
}

/// Type of stream event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StreamEventType {
    /// Incremental text content.
    TextDelta,
    /// Stream finished.
    Done,
}
