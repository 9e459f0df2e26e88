//! Shared HTTP client, SSE parsing, and header utilities.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::NullBotError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(4)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Build default headers for the chat-completion APIs.
///
/// Carries the Bearer token plus the referer/title pair NullBot has
/// always identified itself with to aggregator providers.
pub fn default_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers.insert(
        "HTTP-Referer",
        HeaderValue::from_static("https://github.com/62vf/NullBot"),
    );
    headers.insert("X-Title", HeaderValue::from_static("NullBot-CLI"));
    headers
}

/// One classified line of an SSE stream.
#[derive(Debug, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// A `data:` payload to decode.
    Data(&'a str),
    /// The `[DONE]` terminal sentinel.
    Done,
    /// Comment, event name, blank line.
    Other,
}

/// Classify one SSE line. The space after `data:` is optional.
pub fn parse_sse_line(line: &str) -> SseLine<'_> {
    match line.strip_prefix("data:") {
        Some(rest) => {
            let data = rest.trim_start();
            if data == "[DONE]" {
                SseLine::Done
            } else {
                SseLine::Data(data)
            }
        }
        None => SseLine::Other,
    }
}

/// Map a non-200 HTTP status to an error.
pub fn status_to_error(status: u16, body: &str) -> NullBotError {
    match status {
        401 | 403 => NullBotError::Authentication(body.to_string()),
        _ => NullBotError::api(status, body),
    }
}
