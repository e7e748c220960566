//! HTTP failures translated into user-facing messages

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid token. Use 'azion login' or the --token flag to provide a valid token and try again")]
    Unauthorized,

    #[error("You do not have the permissions to perform this action. Check your permissions and try again")]
    Forbidden,

    #[error("The given web page was not found. Check the URL and try again. If the error persists, contact Azion support")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("An internal server error occurred. Try again later. If the error persists, contact Azion support")]
    Internal,

    #[error("Unexpected response from the Azion API ({status}): {body}")]
    Unexpected { status: u16, body: String },

    #[error("Failed to reach the Azion API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to process the API payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Map a non-2xx status and its body
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            400 => Self::BadRequest(flatten_messages(body)),
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict(flatten_messages(body)),
            500..=599 => Self::Internal,
            _ => Self::Unexpected {
                status,
                body: body.trim().to_string(),
            },
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Collapse v3 (`{"field": ["msg"]}`) and v4 (`{"errors": [{"detail": ..}]}`) bodies
fn flatten_messages(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    let mut messages = Vec::new();
    collect_messages(&value, None, &mut messages);

    if messages.is_empty() {
        body.trim().to_string()
    } else {
        messages.join("; ")
    }
}

fn collect_messages(value: &Value, field: Option<&str>, out: &mut Vec<String>) {
    match value {
        Value::String(s) => match field {
            Some(f) => out.push(format!("{}: {}", f, s)),
            None => out.push(s.clone()),
        },
        Value::Array(items) => {
            for item in items {
                collect_messages(item, field, out);
            }
        }
        Value::Object(map) => {
            if let Some(errors) = map.get("errors").and_then(Value::as_array) {
                for error in errors {
                    let text = ["detail", "title", "message"]
                        .iter()
                        .find_map(|k| error.get(*k).and_then(Value::as_str));
                    match text {
                        Some(t) => out.push(t.to_string()),
                        None => collect_messages(error, field, out),
                    }
                }
                return;
            }
            if let Some(detail) = map.get("detail").and_then(Value::as_str) {
                out.push(detail.to_string());
                return;
            }
            for (key, val) in map {
                collect_messages(val, Some(key), out);
            }
        }
        Value::Number(n) => {
            if let Some(f) = field {
                out.push(format!("{}: {}", f, n));
            }
        }
        Value::Bool(_) | Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_fixed_messages() {
        assert!(matches!(ApiError::from_response(404, ""), ApiError::NotFound));
        assert!(matches!(ApiError::from_response(401, ""), ApiError::Unauthorized));
        assert!(matches!(ApiError::from_response(403, ""), ApiError::Forbidden));
        assert!(matches!(ApiError::from_response(502, "bad gateway"), ApiError::Internal));
        assert!(matches!(
            ApiError::from_response(418, "teapot"),
            ApiError::Unexpected { status: 418, .. }
        ));
    }

    #[test]
    fn v3_field_errors_are_flattened() {
        let err = ApiError::from_response(400, r#"{"name": ["This field is required."]}"#);
        assert_eq!(err.to_string(), "name: This field is required.");
    }

    #[test]
    fn v4_error_details_are_flattened() {
        let body = r#"{"errors": [{"status": "400", "title": "Invalid", "detail": "name is required"}, {"title": "bad active"}]}"#;
        let err = ApiError::from_response(400, body);
        assert_eq!(err.to_string(), "name is required; bad active");
    }

    #[test]
    fn plain_text_body_is_kept() {
        let err = ApiError::from_response(409, "bucket is not empty\n");
        assert!(err.is_conflict());
        assert_eq!(err.to_string(), "bucket is not empty");
    }
}
