//! Human-readable messages from error response bodies.

use serde_json::Value;

/// Extract the message carried by an error body.
///
/// Looks at `error`, then `detail`, then flattens field errors (`{"phone": ["..."]}`) joined
/// with `", "`. Returns `None` for bodies that are not JSON or carry no text.
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let message = match &value {
        Value::Object(fields) => ["error", "detail"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| flatten(fields.values())),
        other => flatten([other]),
    };

    Some(message).filter(|message| !message.trim().is_empty())
}

fn flatten<'a>(values: impl IntoIterator<Item = &'a Value>) -> String {
    let mut parts = Vec::new();

    for value in values {
        collect(value, &mut parts);
    }

    parts.join(", ")
}

fn collect(value: &Value, parts: &mut Vec<String>) {
    match value {
        Value::String(text) => parts.push(text.clone()),
        Value::Array(items) => items.iter().for_each(|item| collect(item, parts)),
        Value::Object(fields) => fields.values().for_each(|field| collect(field, parts)),
        Value::Number(number) => parts.push(number.to_string()),
        Value::Null | Value::Bool(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_error_key() {
        assert_eq!(
            server_message(r#"{"error": "Invalid credentials", "detail": "x"}"#).as_deref(),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn falls_back_to_detail() {
        assert_eq!(
            server_message(r#"{"detail": "CSRF Failed"}"#).as_deref(),
            Some("CSRF Failed")
        );
    }

    #[test]
    fn flattens_field_errors() {
        let message = server_message(
            r#"{"username": ["A user with that username already exists."],
                "password": ["This field may not be blank."]}"#,
        );

        assert_eq!(
            message.as_deref(),
            Some("A user with that username already exists., This field may not be blank.")
        );
    }

    #[test]
    fn ignores_non_json_and_empty_bodies() {
        assert_eq!(server_message("<html>Server Error</html>"), None);
        assert_eq!(server_message("{}"), None);
        assert_eq!(server_message(""), None);
    }
}
