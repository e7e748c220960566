//! API response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paginated listing shared by v3 and v4 endpoints
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub results: Vec<T>,
}

/// Strip the `{"data": ..}` (v4) or `{"results": ..}` (v3) wrapper around a single object
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            let key = ["data", "results"]
                .into_iter()
                .find(|k| map.get(*k).is_some_and(Value::is_object));
            if let Some(inner) = key.and_then(|k| map.remove(k)) {
                return inner;
            }
            Value::Object(map)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelopes_are_unwrapped() {
        assert_eq!(unwrap_envelope(json!({"state": "executed", "data": {"id": 1}})), json!({"id": 1}));
        assert_eq!(unwrap_envelope(json!({"results": {"id": 2}})), json!({"id": 2}));
        assert_eq!(unwrap_envelope(json!({"id": 3})), json!({"id": 3}));
    }

    #[test]
    fn list_results_are_not_mistaken_for_an_envelope() {
        let value = json!({"count": 1, "results": [{"id": 1}]});
        assert_eq!(unwrap_envelope(value.clone()), value);
    }

    #[test]
    fn list_response_defaults() {
        let list: ListResponse<Value> = serde_json::from_value(json!({"results": []})).unwrap();
        assert_eq!(list.count, 0);
        assert!(list.total_pages.is_none());
    }
}
