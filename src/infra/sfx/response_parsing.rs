use serde_json::Value;

const MAX_ERROR_MESSAGE_LEN: usize = 256;

pub(crate) fn truncate_message(body: &str) -> String {
    let compact = body.trim().replace('\n', " ");
    compact.chars().take(MAX_ERROR_MESSAGE_LEN).collect()
}

/// Error bodies carry either `{"detail": "..."}` or
/// `{"detail": {"status": "...", "message": "..."}}`.
pub(crate) fn extract_detail(body: &Value) -> Option<String> {
    let detail = match body.get("detail")? {
        Value::String(text) => text.as_str(),
        Value::Object(fields) => fields.get("message")?.as_str()?,
        _ => return None,
    };
    let detail = truncate_message(detail);
    (!detail.is_empty()).then_some(detail)
}

/// Turns a raw error response body into the JSON value kept on `ApiError`.
/// Non-JSON text is wrapped as a `detail` string so it still surfaces.
pub(crate) fn parse_error_body(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| {
        let mut body = serde_json::Map::new();
        body.insert(
            "detail".to_string(),
            Value::String(truncate_message(trimmed)),
        );
        Value::Object(body)
    })
}
