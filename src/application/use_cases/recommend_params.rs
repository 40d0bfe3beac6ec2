use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::ChatClient;
use crate::domain::{
    build_recommend_prompt, extract_json_object, reply_content, DomainError, Operation,
    RecommendRequest, Recommendation,
};

pub struct RecommendParamsUseCase {
    client: Arc<dyn ChatClient>,
    model: String,
}

impl RecommendParamsUseCase {
    pub fn new(client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Ask the model for new parameter values and keep only whitelisted keys.
    pub async fn execute(&self, request: RecommendRequest) -> Result<Recommendation, DomainError> {
        info!(
            model = %self.model,
            allowed_keys = request.keys.len(),
            "recommend request"
        );

        let payload =
            build_recommend_prompt(&request).into_completion(&self.model, Operation::Recommend);
        let response = self.client.complete(&payload).await?;
        let raw = reply_content(&response)?.unwrap_or_default();
        debug!("recommend raw reply: {raw}");

        let parsed = extract_json_object(raw).inspect_err(|_| {
            warn!("recommend reply could not be parsed as JSON");
        })?;
        let recommendation = Recommendation::from_model_output(&parsed, &request.keys);

        info!(kept_keys = recommendation.result().len(), "recommendation ready");
        Ok(recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MockChatClient;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn drops_keys_outside_the_whitelist() {
        let client = Arc::new(MockChatClient::replying(
            r#"{"result":{"topSpeed":200,"range":500,"color":"red"},"reason":"ok"}"#,
        ));
        let use_case = RecommendParamsUseCase::new(client.clone(), "rec-model");
        let request = RecommendRequest::new("fast").with_keys(["topSpeed", "range"]);

        let rec = use_case.execute(request).await.unwrap();
        assert_eq!(
            serde_json::to_value(&rec).unwrap(),
            json!({"result": {"topSpeed": 200, "range": 500}, "reason": "ok"})
        );

        let payload = client.last_request().unwrap();
        assert_eq!(payload.model, "rec-model");
        assert_eq!(payload.max_tokens, 800);
        assert_eq!(payload.messages.len(), 2);
    }

    #[tokio::test]
    async fn recovers_object_wrapped_in_commentary() {
        let client = Arc::new(MockChatClient::replying(
            "Here you go:\n```json\n{\"range\": 600}\n```",
        ));
        let use_case = RecommendParamsUseCase::new(client, "m");
        let rec = use_case
            .execute(RecommendRequest::new("").with_keys(["range"]))
            .await
            .unwrap();
        assert_eq!(Value::Object(rec.result().clone()), json!({"range": 600}));
        assert_eq!(rec.reason(), "");
    }

    #[tokio::test]
    async fn unparsable_reply_surfaces_raw_text() {
        let client = Arc::new(MockChatClient::replying("I would rather not."));
        let use_case = RecommendParamsUseCase::new(client, "m");
        let err = use_case
            .execute(RecommendRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.raw_reply(), Some("I would rather not."));
    }
}
