//! OpenAI-compatible chat-completions provider (streaming only).

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::Deserialize;
use tracing::debug;

use crate::error::NullBotError;
use crate::types::{ChatDelta, ChatMessage};

use super::http::{default_headers, parse_sse_line, shared_client, status_to_error, SseLine};
use super::{ChatProvider, ChatRequest};

/// Provider for any endpoint speaking the chat-completions wire format.
pub struct OpenAiCompatProvider {
    name: String,
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenAiCompatProvider {
    pub fn new(name: String, model: String, api_key: String, base_url: String) -> Self {
        Self {
            name,
            model,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_request_body(&self, request: &ChatRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_wire)
            .collect::<Vec<_>>();

        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": true,
            "temperature": request.temperature,
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatProvider {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn stream_chat(
        &self,
        request: &ChatRequest,
    ) -> Result<BoxStream<'static, Result<ChatDelta, NullBotError>>, NullBotError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(provider = %self.name, model = %self.model, "opening completion stream");

        let resp = shared_client()
            .post(&url)
            .headers(default_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let byte_stream = resp.bytes_stream();

        let stream = async_stream::stream! {
            let mut buffer = String::new();
            futures::pin_mut!(byte_stream);

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(NullBotError::Network(e));
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim().to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    let data = match parse_sse_line(&line) {
                        SseLine::Data(data) => data,
                        SseLine::Done => {
                            yield Ok(ChatDelta::done());
                            return;
                        }
                        SseLine::Other => continue,
                    };

                    match serde_json::from_str::<WireStreamChunk>(data) {
                        Ok(chunk) => {
                            if let Some(choice) = chunk.choices.into_iter().next() {
                                if let Some(text) = choice.delta.content {
                                    if !text.is_empty() {
                                        yield Ok(ChatDelta::text(text));
                                    }
                                }
                                if choice.finish_reason.is_some() {
                                    yield Ok(ChatDelta::done());
                                    return;
                                }
                            }
                        }
                        Err(_) => {} // skip unparseable chunks
                    }
                }
            }

            // Connection closed without a terminal marker; still a
            // normal end of stream.
            yield Ok(ChatDelta::done());
        };

        Ok(Box::pin(stream))
    }

    async fn verify(&self) -> Result<(), NullBotError> {
        let url = format!("{}/models", self.base_url);
        debug!(provider = %self.name, "verifying API key");

        let resp = shared_client()
            .get(&url)
            .headers(default_headers(&self.api_key))
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }
        Ok(())
    }
}

fn message_to_wire(msg: &ChatMessage) -> serde_json::Value {
    let role = match msg.role {
        crate::types::Role::System => "system",
        crate::types::Role::User => "user",
        crate::types::Role::Assistant => "assistant",
    };
    serde_json::json!({ "role": role, "content": msg.content })
}

// Wire types for streamed chunks (internal)

#[derive(Deserialize)]
struct WireStreamChunk {
    choices: Vec<WireStreamChoice>,
}

#[derive(Deserialize)]
struct WireStreamChoice {
    delta: WireStreamDelta,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct WireStreamDelta {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn provider() -> OpenAiCompatProvider {
        OpenAiCompatProvider::new(
            "openrouter".into(),
            "test-model".into(),
            "sk-test".into(),
            "https://example.com/v1/".into(),
        )
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        assert_eq!(provider().base_url, "https://example.com/v1");
    }

    #[test]
    fn request_body_matches_wire_contract() {
        let request = ChatRequest {
            messages: vec![ChatMessage::system("persona"), ChatMessage::user("hi")],
            temperature: 0.7,
        };
        let body = provider().build_request_body(&request);

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["stream"], true);
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
    }

    #[test]
    fn wire_message_has_only_role_and_content() {
        let wire = message_to_wire(&ChatMessage {
            role: Role::Assistant,
            content: "reply".into(),
            timestamp: None,
        });
        assert_eq!(wire.as_object().unwrap().len(), 2);
    }
}
