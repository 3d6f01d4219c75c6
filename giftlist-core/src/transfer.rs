//! Import and export documents.

use serde_json::Value;

use crate::error::{GiftError, GiftResult};
use crate::gift::Gift;

/// Turn an arbitrary parsed JSON payload into gifts.
///
/// The payload must be an array and every element must be a gift object.
pub fn parse_import(payload: Value) -> GiftResult<Vec<Gift>> {
    let Value::Array(items) = payload else {
        return Err(GiftError::Format(format!(
            "expected an array of gifts, found {}",
            kind_of(&payload)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Gift>(item)
                .map_err(|e| GiftError::Format(format!("gift #{}: {}", index + 1, e)))
        })
        .collect()
}

/// Parse import text. Invalid JSON is a format error.
pub fn parse_import_str(text: &str) -> GiftResult<Vec<Gift>> {
    let payload: Value =
        serde_json::from_str(text).map_err(|e| GiftError::Format(e.to_string()))?;
    parse_import(payload)
}

/// Pretty-printed JSON array, the export file format.
pub fn export_json(gifts: &[Gift]) -> GiftResult<String> {
    serde_json::to_string_pretty(gifts).map_err(|e| GiftError::Serialization(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_arrays() {
        let err = parse_import(json!({"gifts": []})).unwrap_err();
        assert!(matches!(err, GiftError::Format(ref m) if m.contains("an object")));
        assert!(parse_import(json!("[]")).is_err());
    }

    #[test]
    fn rejects_malformed_elements() {
        let err = parse_import(json!([{"name": "Scarf"}])).unwrap_err();
        assert!(matches!(err, GiftError::Format(ref m) if m.starts_with("gift #1")));
    }

    #[test]
    fn invalid_json_text_is_a_format_error() {
        assert!(matches!(
            parse_import_str("not json"),
            Err(GiftError::Format(_))
        ));
    }

    #[test]
    fn accepts_empty_array() {
        assert!(parse_import(json!([])).unwrap().is_empty());
    }
}
