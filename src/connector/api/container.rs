use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::application::{AuditParamsUseCase, ChatAssistUseCase, ChatClient, RecommendParamsUseCase};
use crate::connector::adapter::{SiliconFlowClient, DEFAULT_ENDPOINT, UPSTREAM_TIMEOUT};
use crate::domain::DomainError;

pub const API_KEY_VAR: &str = "SILICONFLOW_API_KEY";
pub const CHAT_MODEL_VAR: &str = "SILICONFLOW_CHAT_MODEL";
pub const RECOMMEND_MODEL_VAR: &str = "SILICONFLOW_RECOMMEND_MODEL";
pub const AUDIT_MODEL_VAR: &str = "SILICONFLOW_AUDIT_MODEL";
pub const DEFAULT_MODEL: &str = "Qwen/Qwen2.5-7B-Instruct";

/// Everything the relay needs to reach the upstream API, read once at startup.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub chat_model: String,
    pub recommend_model: String,
    pub audit_model: String,
    pub timeout: Duration,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            chat_model: DEFAULT_MODEL.to_string(),
            recommend_model: DEFAULT_MODEL.to_string(),
            audit_model: DEFAULT_MODEL.to_string(),
            timeout: UPSTREAM_TIMEOUT,
        }
    }
}

impl ContainerConfig {
    /// Construct from environment variables:
    ///
    /// | Variable                      | Default                    |
    /// |-------------------------------|----------------------------|
    /// | `SILICONFLOW_API_KEY`         | none (upstream calls fail) |
    /// | `SILICONFLOW_CHAT_MODEL`      | `Qwen/Qwen2.5-7B-Instruct` |
    /// | `SILICONFLOW_RECOMMEND_MODEL` | `Qwen/Qwen2.5-7B-Instruct` |
    /// | `SILICONFLOW_AUDIT_MODEL`     | `Qwen/Qwen2.5-7B-Instruct` |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`] but reading variables through `lookup`.
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| non_blank(lookup(name));
        let model = |name: &str| var(name).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            api_key: var(API_KEY_VAR),
            chat_model: model(CHAT_MODEL_VAR),
            recommend_model: model(RECOMMEND_MODEL_VAR),
            audit_model: model(AUDIT_MODEL_VAR),
            ..Self::default()
        }
    }

    /// A blank key leaves the relay without credentials.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = non_blank(Some(api_key.into()));
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Holds the shared upstream client and hands out per-request use cases.
pub struct Container {
    client: Arc<dyn ChatClient>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self, DomainError> {
        debug!("Initializing SiliconFlow client for {}", config.endpoint);
        let client = SiliconFlowClient::new(config.api_key.clone(), &config.endpoint, config.timeout)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Use an arbitrary [`ChatClient`] instead of the HTTP one.
    pub fn with_client(config: ContainerConfig, client: Arc<dyn ChatClient>) -> Self {
        Self { client, config }
    }

    pub fn chat_use_case(&self) -> ChatAssistUseCase {
        ChatAssistUseCase::new(self.client.clone(), &self.config.chat_model)
    }

    pub fn recommend_use_case(&self) -> RecommendParamsUseCase {
        RecommendParamsUseCase::new(self.client.clone(), &self.config.recommend_model)
    }

    pub fn audit_use_case(&self) -> AuditParamsUseCase {
        AuditParamsUseCase::new(self.client.clone(), &self.config.audit_model)
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// One-line startup summary. Never includes the key itself.
    pub fn describe(&self) -> String {
        format!(
            "endpoint={} chat_model={} recommend_model={} audit_model={} timeout={}s api_key={}",
            self.config.endpoint,
            self.config.chat_model,
            self.config.recommend_model,
            self.config.audit_model,
            self.config.timeout.as_secs(),
            if self.has_api_key() { "set" } else { "missing" },
        )
    }
}
