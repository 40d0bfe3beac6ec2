use serde_json::Value;

use crate::domain::{AuditRequest, DomainError};

use super::super::Container;

pub struct AuditController<'a> {
    container: &'a Container,
}

impl<'a> AuditController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn audit(&self, request: AuditRequest) -> Result<Value, DomainError> {
        self.container.audit_use_case().execute(request).await
    }
}
