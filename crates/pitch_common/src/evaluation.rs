//! Evaluation parsing for the grader model's output.
//!
//! The grader is told to return bare JSON but often wraps it in a fenced
//! block, sometimes with a language tag. Parsing is all-or-nothing: either
//! the whole object decodes (absent fields defaulted) or the fixed fallback
//! evaluation is returned.

use crate::error::EvaluationError;
use crate::schemas::Evaluation;
use serde_json::Value;
use tracing::{debug, warn};

/// Markdown code fence delimiter.
pub const CODE_FENCE: &str = "```";

/// Strip a leading fenced block, returning its contents.
///
/// If the trimmed text does not start with a fence it is returned as is.
/// Otherwise the text between the first and second fence is taken (or the
/// rest of the text when the fence is never closed) and a leading language
/// tag such as `json` is dropped.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(after_open) = text.strip_prefix(CODE_FENCE) else {
        return text;
    };
    let body = after_open.split(CODE_FENCE).next().unwrap_or_default();
    strip_language_tag(body).trim()
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
}

/// Drop a language tag at the start of a fenced body.
///
/// A tag is a word starting with a letter, followed by whitespace or the
/// opening bracket of the payload.
fn strip_language_tag(body: &str) -> &str {
    let trimmed = body.trim_start();
    if !trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return body;
    }
    let tag_len = trimmed.find(|c: char| !is_tag_char(c)).unwrap_or(trimmed.len());
    let rest = &trimmed[tag_len..];
    match rest.chars().next() {
        Some(c) if c.is_whitespace() || c == '{' || c == '[' => rest,
        _ => body,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode the grader output, reporting why it could not be decoded.
pub fn try_parse_evaluation(raw: &str) -> Result<Evaluation, EvaluationError> {
    let body = strip_code_fence(raw);
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(EvaluationError::NotAnObject(json_kind(&value)));
    }

    let evaluation: Evaluation = serde_json::from_value(value)?;
    if !evaluation.warmth.is_recognized() {
        warn!(
            "Evaluator returned unrecognized warmth '{}', passing it through",
            evaluation.warmth
        );
    }
    Ok(evaluation)
}

/// Decode the grader output, never failing.
///
/// Any error yields `Evaluation::fallback` with the error text in the first
/// feedback item.
pub fn parse_evaluation(raw: &str) -> Evaluation {
    match try_parse_evaluation(raw) {
        Ok(evaluation) => {
            debug!("Parsed evaluation: warmth={}", evaluation.warmth);
            evaluation
        }
        Err(e) => {
            warn!("Failed to parse evaluation: {} - text: {}", e, raw);
            Evaluation::fallback(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_plain_text_unchanged() {
        assert_eq!(strip_code_fence("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fence_with_json_tag() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fence_with_uppercase_tag() {
        assert_eq!(strip_code_fence("```JSON\n{}\n```"), "{}");
    }

    #[test]
    fn test_strip_fence_without_tag() {
        assert_eq!(strip_code_fence("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fence_tag_glued_to_payload() {
        assert_eq!(strip_code_fence("```json{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_unclosed_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_ignores_trailing_prose() {
        assert_eq!(
            strip_code_fence("```json\n{}\n```\nHope this helps!"),
            "{}"
        );
    }

    #[test]
    fn test_strip_keeps_bare_word_body() {
        assert_eq!(strip_code_fence("```true```"), "true");
    }

    #[test]
    fn test_not_an_object_is_error() {
        let err = try_parse_evaluation("[true, false]").unwrap_err();
        assert!(matches!(err, EvaluationError::NotAnObject("an array")));
    }

    #[test]
    fn test_wrong_field_type_is_error() {
        assert!(try_parse_evaluation(r#"{"gotPull": "yes"}"#).is_err());
        assert!(parse_evaluation(r#"{"gotPull": "yes"}"#).is_fallback());
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let eval = try_parse_evaluation(r#"{"warmth": null, "feedback": null, "gotPull": true}"#)
            .unwrap();
        assert!(eval.got_pull);
        assert_eq!(eval.warmth, crate::schemas::Warmth::Cold);
        assert!(eval.feedback.is_empty());
    }
}
