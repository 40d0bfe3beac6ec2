use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Upstream API did not respond within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Model reply is not valid JSON")]
    UnparsableReply { raw: String },

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedUpstreamResponse(msg.into())
    }

    pub fn unparsable(raw: impl Into<String>) -> Self {
        Self::UnparsableReply { raw: raw.into() }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Raw model output attached to the error, if any.
    pub fn raw_reply(&self) -> Option<&str> {
        match self {
            Self::UnparsableReply { raw } => Some(raw),
            _ => None,
        }
    }
}
