use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::application::ChatClient;
use crate::domain::{
    build_audit_prompt, extract_json_object, reply_content, AuditRequest, DomainError, Operation,
};

pub struct AuditParamsUseCase {
    client: Arc<dyn ChatClient>,
    model: String,
}

impl AuditParamsUseCase {
    pub fn new(client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Audit the parameters. The parsed model reply is returned as-is.
    pub async fn execute(&self, request: AuditRequest) -> Result<Value, DomainError> {
        info!(
            model = %self.model,
            params = request.params.len(),
            "audit request"
        );

        let payload = build_audit_prompt(&request).into_completion(&self.model, Operation::Audit);
        let response = self.client.complete(&payload).await?;
        let raw = reply_content(&response)?.unwrap_or_default();
        debug!("audit raw reply: {raw}");

        extract_json_object(raw)
    }
}
