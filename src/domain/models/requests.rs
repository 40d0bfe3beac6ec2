use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::HistoryEntry;

/// Arbitrary key/value parameter map as edited in the UI.
pub type Params = Map<String, Value>;

/// An explicit `null` reads the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Params,
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<HistoryEntry>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }

    /// The user message with surrounding whitespace removed.
    pub fn trimmed_message(&self) -> &str {
        self.message.trim()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_intent: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Params,
    /// Whitelist of keys the recommendation may contain.
    #[serde(default, deserialize_with = "null_as_default")]
    pub keys: Vec<String>,
}

impl RecommendRequest {
    pub fn new(user_intent: impl Into<String>) -> Self {
        Self {
            user_intent: user_intent.into(),
            ..Default::default()
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Params,
    /// Human-readable names for parameter keys.
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Params,
}

impl AuditRequest {
    pub fn new(params: Params, labels: Params) -> Self {
        Self { params, labels }
    }
}
