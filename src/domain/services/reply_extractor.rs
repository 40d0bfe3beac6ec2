use serde_json::Value;
use tracing::debug;

use crate::domain::DomainError;

/// Returned to the UI when the model produced no usable chat text.
pub const CHAT_FALLBACK_REPLY: &str =
    "Sorry, I could not come up with a reply just now. Please try again.";

/// Navigate an untyped chat-completion body to `choices[0].message.content`.
///
/// A missing `choices[0].message` is a malformed response. A message whose
/// `content` is absent, null or not a string yields `Ok(None)` and is left
/// to the caller.
pub fn reply_content(response: &Value) -> Result<Option<&str>, DomainError> {
    let message = response
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .filter(|message| message.is_object())
        .ok_or_else(|| DomainError::malformed("missing choices[0].message"))?;

    Ok(message.get("content").and_then(Value::as_str))
}

/// Trim the model's chat text, falling back to a fixed sentence when empty.
pub fn extract_chat_reply(content: Option<&str>) -> String {
    match content.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => CHAT_FALLBACK_REPLY.to_string(),
    }
}

/// Recover a JSON value from free-form model output.
///
/// The primary strategy is the greedy span from the first `{` to the last
/// `}`. With no such span the whole text is parsed instead. Should the greedy
/// span not parse (stray braces in surrounding prose, or several objects),
/// balanced `{...}` spans are tried left to right and the first one that
/// parses wins.
pub fn extract_json_object(text: &str) -> Result<Value, DomainError> {
    let Some(span) = greedy_span(text) else {
        return serde_json::from_str::<Value>(text.trim()).map_err(|e| {
            debug!("reply has no brace span and is not JSON: {e}");
            DomainError::unparsable(text)
        });
    };

    if let Ok(value) = serde_json::from_str::<Value>(span) {
        return Ok(value);
    }

    balanced_spans(text)
        .into_iter()
        .find_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
        .ok_or_else(|| {
            debug!("no brace span in reply parses as JSON");
            DomainError::unparsable(text)
        })
}

fn greedy_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Every top-level balanced `{...}` span, skipping braces inside JSON strings.
fn balanced_spans(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    spans.push(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    spans
}
