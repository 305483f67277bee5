//! Best-effort JSON extraction from free-form model replies

use serde::de::DeserializeOwned;

use crate::ChatMbtiError;
use crate::Result;

/// Find the JSON object in a model reply.
///
/// Code fences are stripped and the whole text is tried first; after that
/// every balanced `{...}` span is tried in order of appearance.
pub fn extract_json(text: &str) -> Result<serde_json::Value> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(cleaned) {
        return Ok(value);
    }

    let mut depth = 0_usize;
    let mut start = None;
    for (i, ch) in cleaned.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start.take() {
                        if let Ok(value) = serde_json::from_str(&cleaned[s..=i]) {
                            return Ok(value);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    Err(ChatMbtiError::LlmError(
        "No valid JSON found in response".to_string(),
    ))
}

/// [`extract_json`] followed by deserialization into `T`
pub fn extract_as<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_value(extract_json(text)?)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_plain_and_fenced() {
        assert_eq!(extract_json(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        assert_eq!(
            extract_json("```json\n{\"a\": [1, 2]}\n```").unwrap(),
            json!({"a": [1, 2]})
        );
    }

    #[test]
    fn test_embedded_in_prose() {
        let reply = "Sure! Here is the analysis:\n{\"results\": [{\"name\": \"Amy\", \"mbti\": \"INFP\"}]}\nHope it helps {:}";
        let value = extract_json(reply).unwrap();
        assert_eq!(value["results"][0]["mbti"], "INFP");
    }

    #[test]
    fn test_skips_broken_object() {
        let reply = "{not json} then {\"ok\": true}";
        assert_eq!(extract_json(reply).unwrap(), json!({"ok": true}));
    }

    #[test]
    fn test_no_json() {
        assert!(matches!(
            extract_json("I cannot help with that."),
            Err(ChatMbtiError::LlmError(_))
        ));
        assert!(extract_json("unbalanced { \"a\": 1").is_err());
    }

    #[test]
    fn test_extract_as() {
        #[derive(serde::Deserialize)]
        struct Probe {
            n: u8,
        }
        let probe: Probe = extract_as("result: {\"n\": 7}").unwrap();
        assert_eq!(probe.n, 7);
    }
}
