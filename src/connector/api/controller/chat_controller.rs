use serde::Serialize;

use crate::domain::{ChatRequest, DomainError};

use super::super::Container;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply, DomainError> {
        let reply = self.container.chat_use_case().execute(request).await?;
        Ok(ChatReply { reply })
    }
}
