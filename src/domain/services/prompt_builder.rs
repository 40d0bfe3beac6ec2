use serde_json::{json, Value};

use crate::domain::{
    AuditRequest, ChatMessage, ChatRequest, Params, PromptBundle, RecommendRequest,
};

const CHAT_INSTRUCTIONS: &str = "\
You are the AUTO-GEN vehicle configuration assistant.
Help the user understand and tune the vehicle parameters they are editing.

Rules:
1. Be friendly and concise; prefer short paragraphs or brief bullet lists.
2. Ground every answer in the current parameters shown below.
3. When suggesting a change, name the parameter and the value you would use.
4. If a question has nothing to do with vehicle configuration, say so briefly.";

const RECOMMEND_INSTRUCTIONS: &str = "\
You are a vehicle configuration engine. Given the user's intent and the current \
parameters, recommend new parameter values.

Rules:
1. Return ONLY a strict JSON object, no prose, no markdown, no code fences.
2. The object must have exactly this shape: {\"result\": {...}, \"reason\": \"...\"}.
3. Every key inside \"result\" must be taken from the allowed key list below; \
   never invent keys.
4. Only include keys whose value you want to change.
5. \"reason\" is one or two sentences explaining the recommendation.";

const AUDIT_INSTRUCTIONS: &str = "\
You are a vehicle configuration auditor. Check the supplied parameters for \
inconsistent, unrealistic or unsafe combinations. Labels give the human-readable \
name of each parameter key.

Rules:
1. Return ONLY a strict JSON object, no prose, no markdown, no code fences.
2. The object must have exactly this shape: \
   {\"ok\": true|false, \"issues\": [\"...\"], \"suggestions\": [\"...\"]}.
3. \"ok\" is true only when there are no issues.
4. Refer to parameters by their label when one is available.";

/// Build the conversation for free-form chat: system instructions plus a
/// dump of the current parameters, the normalised history, then the user's
/// message.
pub fn build_chat_prompt(request: &ChatRequest) -> PromptBundle {
    let system_prompt = format!(
        "{CHAT_INSTRUCTIONS}\n\nCurrent parameters:\n{}",
        pretty(&request.params)
    );

    let mut messages = Vec::with_capacity(request.history.len() + 2);
    messages.push(ChatMessage::system(system_prompt.clone()));
    messages.extend(request.history.iter().map(|entry| entry.to_message()));
    messages.push(ChatMessage::user(request.trimmed_message()));

    PromptBundle {
        system_prompt,
        messages,
    }
}

pub fn build_recommend_prompt(request: &RecommendRequest) -> PromptBundle {
    let system_prompt = format!(
        "{RECOMMEND_INSTRUCTIONS}\n\nAllowed keys: {}",
        Value::from(request.keys.clone())
    );
    let user = json!({
        "userIntent": request.user_intent,
        "params": request.params,
    });

    PromptBundle {
        messages: vec![
            ChatMessage::system(system_prompt.clone()),
            ChatMessage::user(user.to_string()),
        ],
        system_prompt,
    }
}

pub fn build_audit_prompt(request: &AuditRequest) -> PromptBundle {
    let system_prompt = AUDIT_INSTRUCTIONS.to_string();
    let user = json!({
        "params": request.params,
        "labels": request.labels,
    });

    PromptBundle {
        messages: vec![
            ChatMessage::system(system_prompt.clone()),
            ChatMessage::user(user.to_string()),
        ],
        system_prompt,
    }
}

fn pretty(params: &Params) -> String {
    format!("{:#}", Value::Object(params.clone()))
}
