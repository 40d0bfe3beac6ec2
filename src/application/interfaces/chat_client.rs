use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{CompletionRequest, DomainError};

/// An interface for sending a chat-completion payload to an LLM provider.
///
/// Implementors encapsulate transport, credentials and timeouts. The body is
/// handed back as untyped JSON; callers navigate it with
/// [`crate::domain::reply_content`].
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Value, DomainError>;
}
