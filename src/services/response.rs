//! Turns raw helper output into a [`Reply`] or a [`BearError`].

use crate::constants::callback::{ERROR_MESSAGE_KEY, NOTE_KEY};
use crate::constants::limits::REPLY_DETAIL_BYTES;
use crate::errors::BearError;
use crate::utils::text::truncate_utf8_prefix;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static TAG_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"tag=([^&]+)").expect("tag parameter regex"));

/// The recognized success shapes of a callback reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The helper printed nothing.
    Empty,
    /// A reply that carries the note text under `note`.
    Note(Map<String, Value>),
    /// A two-field reply with an empty-string key; holds the decoded JSON
    /// from the other field.
    Unwrapped(Value),
    /// Any other object of x-success fields, returned as-is.
    Fields(Map<String, Value>),
}

impl Reply {
    pub fn is_empty(&self) -> bool {
        matches!(self, Reply::Empty)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            Reply::Note(map) | Reply::Fields(map) => map.get(key),
            Reply::Unwrapped(value) => value.get(key),
            Reply::Empty => None,
        }
    }

    pub fn note_text(&self) -> Option<&str> {
        self.field(NOTE_KEY).and_then(Value::as_str)
    }

    pub fn into_value(self) -> Value {
        match self {
            Reply::Empty => Value::String(String::new()),
            Reply::Note(map) | Reply::Fields(map) => Value::Object(map),
            Reply::Unwrapped(value) => value,
        }
    }
}

fn reply_excerpt(raw: &str) -> Value {
    Value::String(truncate_utf8_prefix(raw, REPLY_DETAIL_BYTES))
}

/// Decodes `raw`, unwrapping JSON strings until an object remains.
fn decode_object(raw: &str) -> Result<Map<String, Value>, BearError> {
    let mut value: Value = serde_json::from_str(raw).map_err(|err| {
        BearError::decode(format!("Reply is not valid JSON: {}", err))
            .with_details(serde_json::json!({ "reply": reply_excerpt(raw) }))
    })?;
    while let Value::String(inner) = value {
        value = serde_json::from_str(&inner).map_err(|err| {
            BearError::decode(format!("Nested reply is not valid JSON: {}", err))
                .with_details(serde_json::json!({ "reply": reply_excerpt(&inner) }))
        })?;
    }
    match value {
        Value::Object(map) => Ok(map),
        other => Err(BearError::decode("Reply is not a JSON object")
            .with_details(serde_json::json!({ "reply": reply_excerpt(&other.to_string()) }))),
    }
}

/// Names the tag from the request in an error message that mentions a tag.
pub fn annotate_tag(message: &str, url: &str) -> String {
    if !message.contains("tag") {
        return message.to_string();
    }
    match TAG_PARAM.captures(url).and_then(|caps| caps.get(1)) {
        Some(tag) => message.replace("tag ", &format!("tag {} ", tag.as_str())),
        None => message.to_string(),
    }
}

fn unwrap_anonymous(map: &Map<String, Value>) -> Option<Result<Value, BearError>> {
    if map.len() != 2 || !map.contains_key("") {
        return None;
    }
    let (key, nested) = map.iter().find(|(key, _)| !key.is_empty())?;
    let decoded = match nested {
        Value::String(text) => serde_json::from_str(text).map_err(|err| {
            BearError::decode(format!("Field '{}' does not hold JSON: {}", key, err))
                .with_details(serde_json::json!({ "reply": reply_excerpt(text) }))
        }),
        _ => Err(BearError::decode(format!(
            "Field '{}' does not hold a JSON string",
            key
        ))),
    };
    Some(decoded)
}

/// Classifies the helper's output for the request sent as `url`.
pub fn normalize(raw: &str, url: &str) -> Result<Reply, BearError> {
    if raw.trim().is_empty() {
        return Ok(Reply::Empty);
    }
    let map = decode_object(raw)?;
    if let Some(message) = map.get(ERROR_MESSAGE_KEY) {
        let text = match message {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        return Err(BearError::remote(annotate_tag(&text, url))
            .with_details(serde_json::json!({ "error_message": text })));
    }
    if map.contains_key(NOTE_KEY) {
        return Ok(Reply::Note(map));
    }
    if let Some(decoded) = unwrap_anonymous(&map) {
        return decoded.map(Reply::Unwrapped);
    }
    Ok(Reply::Fields(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BearErrorKind;
    use serde_json::json;

    const URL: &str = "bear://x-callback-url/open-note?id=N1";

    #[test]
    fn empty_output_is_empty_reply() {
        assert_eq!(normalize("", URL).unwrap(), Reply::Empty);
        assert_eq!(normalize("\n", URL).unwrap().into_value(), json!(""));
    }

    #[test]
    fn note_payload_is_returned_unchanged() {
        let raw = r##"{"note":"# Groceries\n#home","identifier":"N1","is_trashed":"no"}"##;
        let reply = normalize(raw, URL).unwrap();
        assert_eq!(reply.note_text(), Some("# Groceries\n#home"));
        assert_eq!(
            reply.into_value(),
            serde_json::from_str::<Value>(raw).unwrap()
        );
    }

    #[test]
    fn doubly_encoded_payload_is_decoded() {
        let inner = json!({"identifier": "N2", "title": "Fresh"}).to_string();
        let raw = serde_json::to_string(&serde_json::to_string(&inner).unwrap()).unwrap();
        let reply = normalize(&raw, URL).unwrap();
        assert_eq!(reply.field("identifier"), Some(&json!("N2")));
    }

    #[test]
    fn error_message_becomes_remote_error_with_tag_name() {
        let raw = r#"{"errorMessage":"The tag could not be found"}"#;
        let url = "bear://x-callback-url/search?tag=widgets&show_window=no";
        let err = normalize(raw, url).unwrap_err();
        assert_eq!(err.kind, BearErrorKind::Remote);
        assert_eq!(err.message, "The tag widgets could not be found");
    }

    #[test]
    fn error_message_without_tag_param_is_kept() {
        let raw = r#"{"errorMessage":"The tag could not be found"}"#;
        let err = normalize(raw, URL).unwrap_err();
        assert_eq!(err.message, "The tag could not be found");
    }

    #[test]
    fn anonymous_wrapper_is_unwrapped() {
        let raw = json!({
            "": "x-success",
            "other": "{\"tags\": [{\"name\": \"home\"}]}"
        })
        .to_string();
        let reply = normalize(&raw, URL).unwrap();
        assert_eq!(reply, Reply::Unwrapped(json!({"tags": [{"name": "home"}]})));
    }

    #[test]
    fn three_fields_with_empty_key_are_not_unwrapped() {
        let raw = json!({"": "x", "a": "1", "b": "2"}).to_string();
        assert!(matches!(normalize(&raw, URL).unwrap(), Reply::Fields(_)));
    }

    #[test]
    fn plain_success_fields_are_returned() {
        let raw = r#"{"identifier":"N3","title":"Created"}"#;
        let reply = normalize(raw, URL).unwrap();
        assert!(matches!(reply, Reply::Fields(_)));
        assert_eq!(reply.field("title"), Some(&json!("Created")));
    }

    #[test]
    fn malformed_output_is_decode_error() {
        let err = normalize("xcall: no such app", URL).unwrap_err();
        assert_eq!(err.kind, BearErrorKind::Decode);
        let err = normalize("[1, 2]", URL).unwrap_err();
        assert_eq!(err.kind, BearErrorKind::Decode);
        let err = normalize(&json!({"": "x", "tags": "not json"}).to_string(), URL).unwrap_err();
        assert_eq!(err.kind, BearErrorKind::Decode);
    }
}
