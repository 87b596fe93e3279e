use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, error};
use crate::domain::{error::IngestionError, models::IngestedDocument, ports::DocumentParser};

/// Parses one file as a single JSON object.
///
/// Malformed input and non-object top-level values are rejected rather than
/// stored as an empty document.
pub fn parse_json(bytes: &[u8]) -> Result<IngestedDocument, IngestionError> {
    debug!("Parsing {} bytes as JSON", bytes.len());

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| {
            error!("Failed to decode JSON at line {}, column {}: {}", e.line(), e.column(), e);
            IngestionError::Parse(e.to_string())
        })?;

    match value {
        Value::Object(document) => {
            info!("Parsed JSON object with {} top-level keys", document.len());
            Ok(document)
        }
        other => {
            let kind = value_kind(&other);
            error!("Top-level JSON value is {}, expected an object", kind);
            Err(IngestionError::NotAnObject(kind))
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Default)]
pub struct JsonParser;

impl JsonParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for JsonParser {
    async fn parse(&self, file_bytes: &[u8]) -> Result<IngestedDocument, IngestionError> {
        parse_json(file_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_nested_object() {
        let doc = parse_json(br#"{"a":1,"b":"x","c":{"d":[true,null,2.5]}}"#).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc["a"], json!(1));
        assert_eq!(doc["b"], json!("x"));
        assert_eq!(doc["c"], json!({"d": [true, null, 2.5]}));
    }

    #[test]
    fn test_reencoded_object_decodes_to_same_document() {
        let original = json!({
            "name": "widget",
            "tags": ["a", "b"],
            "dims": {"w": 3, "h": 4.5},
            "active": false,
            "note": null
        });
        let bytes = serde_json::to_vec(&original).unwrap();
        let doc = parse_json(&bytes).unwrap();
        assert_eq!(Value::Object(doc), original);
    }

    #[test]
    fn test_top_level_array_is_rejected() {
        let err = parse_json(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, IngestionError::NotAnObject("an array")));
    }

    #[test]
    fn test_top_level_scalars_are_rejected() {
        assert!(matches!(parse_json(b"42"), Err(IngestionError::NotAnObject("a number"))));
        assert!(matches!(parse_json(b"\"hi\""), Err(IngestionError::NotAnObject("a string"))));
        assert!(matches!(parse_json(b"null"), Err(IngestionError::NotAnObject("null"))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse_json(br#"{"a": 1,"#).unwrap_err();
        assert!(matches!(err, IngestionError::Parse(_)));

        let err = parse_json(b"").unwrap_err();
        assert!(matches!(err, IngestionError::Parse(_)));
    }

    #[tokio::test]
    async fn test_parser_port_delegates() {
        let doc = JsonParser::new().parse(br#"{"k":"v"}"#).await.unwrap();
        assert_eq!(doc["k"], json!("v"));
    }
}
