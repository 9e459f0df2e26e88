//! Core types shared across the crate.

pub mod message;
pub mod stream;

pub use message::{ChatMessage, Role};
pub use stream::{ChatDelta, StreamEventType};
