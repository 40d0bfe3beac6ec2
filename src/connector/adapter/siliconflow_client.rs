use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{CompletionRequest, DomainError};

/// Chat-completion endpoint of the SiliconFlow API.
pub const DEFAULT_ENDPOINT: &str = "https://api.siliconflow.cn/v1/chat/completions";
/// No complete response within this window aborts the request.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_millis(180_000);

/// HTTP client for the SiliconFlow chat-completion API (OpenAI-compatible).
///
/// One POST per call with bearer authorization; no retries. The timeout
/// covers the whole exchange including the body, and a timed-out request
/// drops its connection instead of leaving it open.
///
/// The key is used as given; blank values are discarded by
/// [`crate::connector::api::ContainerConfig`]. Without an API key every call
/// fails with a configuration error before any network traffic happens.
pub struct SiliconFlowClient {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    timeout: Duration,
}

impl SiliconFlowClient {
    pub fn new(
        api_key: Option<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            warn!("SiliconFlowClient: no response within {:?}", self.timeout);
            DomainError::Timeout(self.timeout)
        } else {
            warn!("SiliconFlowClient: request failed: {e}");
            DomainError::transport(e.to_string())
        }
    }
}

#[async_trait]
impl ChatClient for SiliconFlowClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Value, DomainError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::configuration("SILICONFLOW_API_KEY is not configured"))?;

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "SiliconFlowClient: sending completion request"
        );
        let start_time = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.request_error(e))?;

        debug!(
            status = status.as_u16(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "SiliconFlowClient: response received"
        );

        if !status.is_success() {
            warn!("SiliconFlowClient: API returned {status}: {body}");
            return Err(DomainError::upstream(status.as_u16(), body));
        }

        serde_json::from_str(&body)
            .map_err(|e| DomainError::parse(format!("upstream body is not valid JSON: {e}")))
    }
}
