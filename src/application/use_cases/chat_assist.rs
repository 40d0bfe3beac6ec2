use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::ChatClient;
use crate::domain::{
    build_chat_prompt, extract_chat_reply, reply_content, ChatRequest, DomainError, Operation,
};

pub struct ChatAssistUseCase {
    client: Arc<dyn ChatClient>,
    model: String,
}

impl ChatAssistUseCase {
    pub fn new(client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Answer a free-form question about the current parameters.
    ///
    /// An empty or whitespace-only message is rejected before the upstream
    /// API is contacted.
    pub async fn execute(&self, request: ChatRequest) -> Result<String, DomainError> {
        if request.trimmed_message().is_empty() {
            return Err(DomainError::validation("message is required"));
        }

        info!(
            model = %self.model,
            history = request.history.len(),
            "chat request"
        );
        let start_time = Instant::now();

        let payload = build_chat_prompt(&request).into_completion(&self.model, Operation::Chat);
        let response = self.client.complete(&payload).await?;
        let content = reply_content(&response)?;
        debug!("chat raw reply: {:?}", content);

        let reply = extract_chat_reply(content);
        info!(
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "chat reply ready"
        );
        Ok(reply)
    }
}
