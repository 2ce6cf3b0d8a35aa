//! Tolerant extraction of JSON payloads from model replies.
//!
//! Even with a JSON response MIME type the model occasionally wraps its
//! payload in prose or code fences, so the outermost array or object is
//! located before parsing.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Extraction errors.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("invalid response format: {0}")]
    InvalidFormat(String),
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Parse a typed JSON payload out of model text.
pub fn extract_payload<T: DeserializeOwned>(text: &str) -> ExtractionResult<T> {
    let slice = isolate_json(text)?;
    Ok(serde_json::from_str(slice)?)
}

/// Slice out the outermost JSON array or object, whichever opens first.
fn isolate_json(text: &str) -> ExtractionResult<&str> {
    let (open, close_ch) = match (text.find('{'), text.find('[')) {
        (Some(obj), Some(arr)) if arr < obj => (arr, ']'),
        (Some(obj), _) => (obj, '}'),
        (None, Some(arr)) => (arr, ']'),
        (None, None) => {
            return Err(ExtractionError::InvalidFormat(
                "no JSON payload found in response".into(),
            ))
        }
    };

    let close = text.rfind(close_ch).ok_or_else(|| {
        ExtractionError::InvalidFormat(format!("no closing '{close_ch}' found in response"))
    })?;
    if close < open {
        return Err(ExtractionError::InvalidFormat(
            "mismatched JSON delimiters in response".into(),
        ));
    }

    Ok(&text[open..=close])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Value;

    #[test]
    fn test_bare_object() {
        let value: Value = extract_payload(r#"{"chemoOptions":[]}"#).unwrap();
        assert!(value.get("chemoOptions").is_some());
    }

    #[test]
    fn test_bare_array() {
        let value: Vec<Value> = extract_payload(r#"[{"id":"a"},{"id":"b"}]"#).unwrap();
        assert_eq!(value.len(), 2);
    }

    #[test]
    fn test_array_with_prose_prefix() {
        let text = "根据患者情况，建议如下:\n[{\"id\":\"a\"}]\n请结合临床判断。";
        let value: Vec<Value> = extract_payload(text).unwrap();
        assert_eq!(value.len(), 1);
    }

    #[test]
    fn test_object_in_code_fence() {
        let text = "```json\n{\"endocrineOptions\": []}\n```";
        let value: Value = extract_payload(text).unwrap();
        assert!(value.get("endocrineOptions").is_some());
    }

    #[test]
    fn test_array_nested_in_object_picks_object() {
        let text = r#"{"items": [1, 2, 3]}"#;
        let value: Value = extract_payload(text).unwrap();
        assert_eq!(value["items"][2], 3);
    }

    #[test]
    fn test_no_json_is_an_error() {
        let result: ExtractionResult<Value> = extract_payload("服务暂时不可用，请稍后再试。");
        assert!(matches!(result, Err(ExtractionError::InvalidFormat(_))));
    }

    #[test]
    fn test_garbage_json_is_a_parse_error() {
        let result: ExtractionResult<Value> = extract_payload("{not json}");
        assert!(matches!(result, Err(ExtractionError::JsonParse(_))));
    }

    proptest! {
        /// Prose around the payload never changes what gets parsed.
        #[test]
        fn wrapping_prose_is_ignored(
            prefix in "[a-zA-Z0-9 。，\n]{0,40}",
            suffix in "[a-zA-Z0-9 。，\n]{0,40}",
        ) {
            let text = format!("{prefix}[{{\"id\":\"x\"}}]{suffix}");
            let value: Vec<Value> = extract_payload(&text).unwrap();
            prop_assert_eq!(value.len(), 1);
            prop_assert_eq!(value[0]["id"].as_str(), Some("x"));
        }
    }
}
