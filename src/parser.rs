//! JSON body decoding and envelope access.

use serde_json::{Map, Value};

use crate::error::ResponseError;

/// Root key wrapping every Train Tracker response.
pub const ENVELOPE_KEY: &str = "ctatt";

/// Decodes a response body into an untyped JSON tree.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON.
pub fn parse_body(bytes: &[u8]) -> serde_json::Result<Value> {
    serde_json::from_slice(bytes)
}

/// Returns the `ctatt` object of a decoded response.
pub fn envelope(root: &Value) -> Result<&Map<String, Value>, ResponseError> {
    match root.get(ENVELOPE_KEY) {
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ResponseError::UnexpectedShape {
            scope: ENVELOPE_KEY.to_string(),
            expected: "an object",
        }),
        None => Err(ResponseError::MissingEnvelope(ENVELOPE_KEY)),
    }
}

/// Reads the envelope's `errCd` as a number, whether sent as text or numeric.
pub fn error_code(envelope: &Map<String, Value>) -> Option<u16> {
    match envelope.get("errCd")? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        _ => None,
    }
}

/// Views a member as a sequence of elements.
///
/// The service converts XML to JSON, so a single element arrives as a bare
/// object and an empty list may be omitted or `null`.
pub fn as_sequence<'a>(
    value: Option<&'a Value>,
    scope: impl FnOnce() -> String,
) -> Result<Vec<&'a Value>, ResponseError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().collect()),
        Some(obj @ Value::Object(_)) => Ok(vec![obj]),
        Some(_) => Err(ResponseError::UnexpectedShape {
            scope: scope(),
            expected: "a list or object",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_invalid_bytes() {
        assert!(parse_body(b"<ctatt></ctatt>").is_err());
        assert!(parse_body(&[]).is_err());
    }

    #[test]
    fn test_envelope_lookup() {
        let root = json!({"ctatt": {"tmst": "2024-01-01T12:00:00", "errCd": "0"}});
        let env = envelope(&root).unwrap();
        assert_eq!(env["tmst"], "2024-01-01T12:00:00");
        assert_eq!(error_code(env), Some(0));

        assert_eq!(
            envelope(&json!({"bustime": {}})),
            Err(ResponseError::MissingEnvelope("ctatt"))
        );
        assert!(envelope(&json!({"ctatt": []})).is_err());
    }

    #[test]
    fn test_error_code_numeric() {
        let root = json!({"ctatt": {"errCd": 101}});
        assert_eq!(error_code(envelope(&root).unwrap()), Some(101));
    }

    #[test]
    fn test_as_sequence_shapes() {
        let scope = || "test".to_string();
        assert!(as_sequence(None, scope).unwrap().is_empty());
        assert!(as_sequence(Some(&Value::Null), scope).unwrap().is_empty());
        assert_eq!(as_sequence(Some(&json!([1, 2])), scope).unwrap().len(), 2);
        assert_eq!(as_sequence(Some(&json!({"rn": "1"})), scope).unwrap().len(), 1);
        assert!(as_sequence(Some(&json!("x")), scope).is_err());
    }
}
