use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::application::ChatClient;
use crate::domain::{CompletionRequest, DomainError};

/// Scripted [`ChatClient`] that answers every call the same way and records
/// the payloads it was given.
pub struct MockChatClient {
    reply: Result<Value, DomainError>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockChatClient {
    /// Answer with an OpenAI-style body whose first choice carries `content`.
    pub fn replying(content: impl Into<String>) -> Self {
        Self::with_body(json!({
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content.into()},
                "finish_reason": "stop"
            }]
        }))
    }

    pub fn with_body(body: Value) -> Self {
        Self {
            reply: Ok(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            reply: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.recorded().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.recorded().last().cloned()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Vec<CompletionRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Value, DomainError> {
        self.recorded().push(request.clone());
        self.reply.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{reply_content, ChatMessage, Operation};

    #[tokio::test]
    async fn records_requests_and_replays_content() {
        let client = MockChatClient::replying("hello");
        let request = CompletionRequest::new(
            "m",
            vec![ChatMessage::user("hi")],
            Operation::Chat.sampling(),
        );

        let body = client.complete(&request).await.unwrap();
        assert_eq!(reply_content(&body).unwrap(), Some("hello"));
        assert_eq!(client.calls(), 1);
        assert_eq!(client.last_request(), Some(request));
    }

    #[tokio::test]
    async fn failing_client_returns_its_error_every_time() {
        let client = MockChatClient::failing(DomainError::configuration("no key"));
        let request = CompletionRequest::new("m", vec![], Operation::Audit.sampling());

        for _ in 0..2 {
            let err = client.complete(&request).await.unwrap_err();
            assert!(matches!(err, DomainError::Configuration(_)));
        }
        assert_eq!(client.calls(), 2);
    }
}
