use serde::Serialize;

use super::ChatMessage;

/// The three operations the relay exposes. Each one pins its own sampling
/// settings; the structured ones run colder so the model sticks to JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Chat,
    Recommend,
    Audit,
}

impl Operation {
    pub fn sampling(&self) -> SamplingProfile {
        match self {
            Operation::Chat => SamplingProfile::new(0.6, 1000),
            Operation::Recommend => SamplingProfile::new(0.2, 800),
            Operation::Audit => SamplingProfile::new(0.3, 600),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingProfile {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl SamplingProfile {
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// Output of a prompt builder: the system instruction and the full ordered
/// conversation, system message first.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptBundle {
    pub system_prompt: String,
    pub messages: Vec<ChatMessage>,
}

impl PromptBundle {
    pub fn into_completion(self, model: impl Into<String>, operation: Operation) -> CompletionRequest {
        CompletionRequest::new(model, self.messages, operation.sampling())
    }
}

/// Chat-completion payload sent verbatim to the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>, sampling: SamplingProfile) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_is_fixed_per_operation() {
        assert_eq!(Operation::Chat.sampling(), SamplingProfile::new(0.6, 1000));
        assert_eq!(Operation::Recommend.sampling(), SamplingProfile::new(0.2, 800));
        assert_eq!(Operation::Audit.sampling(), SamplingProfile::new(0.3, 600));
    }

    #[test]
    fn completion_request_serializes_upstream_shape() {
        let req = CompletionRequest::new(
            "m",
            vec![ChatMessage::system("s"), ChatMessage::user("u")],
            Operation::Audit.sampling(),
        );
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["model"], "m");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "u");
        assert_eq!(value["max_tokens"], 600);
        assert!((value["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }
}
