use serde::Serialize;
use serde_json::{Map, Value};

/// A parameter recommendation restricted to the caller's whitelist.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendation {
    result: Map<String, Value>,
    reason: String,
}

impl Recommendation {
    /// Build a recommendation from whatever JSON the model produced.
    ///
    /// If the reply has a `result` field, that is the candidate map and
    /// `reason` the explanation; otherwise the whole object is the candidate.
    /// Only keys listed in `allowed` survive.
    pub fn from_model_output(parsed: &Value, allowed: &[String]) -> Self {
        let (candidate, reason) = match parsed.get("result") {
            Some(result) => (
                result.as_object(),
                parsed
                    .get("reason")
                    .and_then(Value::as_str)
                    .unwrap_or_default(),
            ),
            None => (parsed.as_object(), ""),
        };

        let result = match candidate {
            Some(map) => filter_keys(map, allowed),
            None => Map::new(),
        };

        Self {
            result,
            reason: reason.to_string(),
        }
    }

    pub fn result(&self) -> &Map<String, Value> {
        &self.result
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Copy the entries of `candidate` whose key appears in `allowed`, in
/// whitelist order.
pub fn filter_keys(candidate: &Map<String, Value>, allowed: &[String]) -> Map<String, Value> {
    let mut filtered = Map::new();
    for key in allowed {
        if let Some(value) = candidate.get(key) {
            filtered.insert(key.clone(), value.clone());
        }
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn hallucinated_keys_are_dropped() {
        let parsed = json!({
            "result": {"topSpeed": 200, "range": 500, "color": "red"},
            "reason": "ok"
        });
        let rec = Recommendation::from_model_output(&parsed, &keys(&["topSpeed", "range"]));
        assert_eq!(
            Value::Object(rec.result().clone()),
            json!({"topSpeed": 200, "range": 500})
        );
        assert_eq!(rec.reason(), "ok");
    }

    #[test]
    fn bare_object_is_treated_as_candidate_map() {
        let parsed = json!({"range": 420, "weight": 1800});
        let rec = Recommendation::from_model_output(&parsed, &keys(&["range"]));
        assert_eq!(Value::Object(rec.result().clone()), json!({"range": 420}));
        assert_eq!(rec.reason(), "");
    }

    #[test]
    fn missing_or_non_string_reason_defaults_to_empty() {
        let parsed = json!({"result": {"range": 1}, "reason": 42});
        let rec = Recommendation::from_model_output(&parsed, &keys(&["range"]));
        assert_eq!(rec.reason(), "");
    }

    #[test]
    fn non_object_result_yields_empty_map() {
        let parsed = json!({"result": [1, 2, 3], "reason": "list"});
        let rec = Recommendation::from_model_output(&parsed, &keys(&["range"]));
        assert!(rec.result().is_empty());
        assert_eq!(rec.reason(), "list");
    }

    #[test]
    fn empty_whitelist_admits_nothing() {
        let parsed = json!({"result": {"range": 1}});
        let rec = Recommendation::from_model_output(&parsed, &[]);
        assert!(rec.result().is_empty());
    }

    #[test]
    fn filtered_keys_are_always_a_subset_of_the_whitelist() {
        let candidates = [
            json!({"a": 1, "b": 2, "c": 3}),
            json!({"x": true}),
            json!({}),
            json!({"a": null, "z": "zz"}),
        ];
        let whitelists = [keys(&["a", "b"]), keys(&["z"]), keys(&[]), keys(&["a", "a"])];

        for candidate in &candidates {
            for allowed in &whitelists {
                let filtered = filter_keys(candidate.as_object().unwrap(), allowed);
                assert!(filtered.keys().all(|k| allowed.contains(k)));
            }
        }
    }

    #[test]
    fn serializes_result_and_reason() {
        let parsed = json!({"result": {"range": 1}, "reason": "why"});
        let rec = Recommendation::from_model_output(&parsed, &keys(&["range"]));
        assert_eq!(
            serde_json::to_value(&rec).unwrap(),
            json!({"result": {"range": 1}, "reason": "why"})
        );
    }
}
