//! Response normalization.
//!
//! Model output is untrusted. It may be wrapped in code fences, carry a
//! `<think>` block, or surround the JSON payload with prose. Normalization
//! never fails: text that does not decode becomes a `RawFallback` result whose
//! single reply option holds the cleaned text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::foundation::Timestamp;

use super::result::{CoachingResult, PerceptionInsight, ReplyOption, ResultSource};

/// Diagnosis used when the payload decodes but carries none.
pub const MISSING_DIAGNOSIS: &str =
    "No overall tone analysis came back; focus on the reply suggestions themselves.";

/// Diagnosis used for the raw-text fallback.
pub const UNEXPECTED_FORMAT_DIAGNOSIS: &str =
    "The model's reply format was unexpected; its original text is shown below for reference.";

static FENCE_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)```json|```").expect("fence pattern is valid"));

static THINK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<think>.*?</think>").expect("think pattern is valid"));

/// Strips fences and reasoning blocks, then slices from the first `{` to the
/// last `}`. Without a usable brace pair the trimmed remainder is returned.
pub fn sanitize_block(raw: &str) -> String {
    let without_fences = FENCE_MARKERS.replace_all(raw, "");
    let without_think = THINK_BLOCK.replace_all(&without_fences, "");

    match (without_think.find('{'), without_think.rfind('}')) {
        (Some(start), Some(end)) if end > start => without_think[start..=end].trim().to_string(),
        _ => without_think.trim().to_string(),
    }
}

/// Decoded payload with every list normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CoachingPayload {
    tone_diagnosis: Option<String>,
    perception_insights: Vec<PerceptionInsight>,
    reply_options: Vec<ReplyOption>,
}

/// Items that are not objects, or whose fields have the wrong type, are dropped.
fn list_field<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Vec<T> {
    match object.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| item.is_object())
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn decode_payload(cleaned: &str) -> Option<CoachingPayload> {
    let value: Value = serde_json::from_str(cleaned).ok()?;
    let object = value.as_object()?;

    Some(CoachingPayload {
        tone_diagnosis: object
            .get("toneDiagnosis")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string),
        perception_insights: list_field(object, "perceptionInsights"),
        reply_options: list_field(object, "replyOptions"),
    })
}

fn fallback_option(cleaned: String) -> ReplyOption {
    ReplyOption {
        id: "raw".to_string(),
        label: "View original text".to_string(),
        message: cleaned,
        why_better: "The model did not follow the expected format, so its full original text is shown for reference."
            .to_string(),
        tone_guide: "Free-form".to_string(),
    }
}

/// Turns the model's completion text into a fully-formed result.
pub fn normalize_response(raw: &str) -> CoachingResult {
    let cleaned = sanitize_block(raw);

    match decode_payload(&cleaned) {
        Some(payload) => CoachingResult {
            tone_diagnosis: payload
                .tone_diagnosis
                .unwrap_or_else(|| MISSING_DIAGNOSIS.to_string()),
            perception_insights: payload.perception_insights,
            reply_options: payload.reply_options,
            raw: raw.to_string(),
            created_at: Timestamp::now(),
            source: ResultSource::Parsed,
        },
        None => {
            tracing::warn!(
                raw_len = raw.len(),
                "Model output did not decode, returning raw text"
            );
            CoachingResult {
                tone_diagnosis: UNEXPECTED_FORMAT_DIAGNOSIS.to_string(),
                perception_insights: Vec::new(),
                reply_options: vec![fallback_option(cleaned)],
                raw: raw.to_string(),
                created_at: Timestamp::now(),
                source: ResultSource::RawFallback,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_payload_with_prose_parses() {
        let raw = "Here you go:\n```json\n{\"toneDiagnosis\":\"ok\",\"perceptionInsights\":[],\"replyOptions\":[{\"id\":\"a\",\"label\":\"L\",\"message\":\"M\",\"whyBetter\":\"W\",\"toneGuide\":\"T\"}]}\n```";
        let result = normalize_response(raw);

        assert_eq!(result.source, ResultSource::Parsed);
        assert_eq!(result.tone_diagnosis, "ok");
        assert!(result.perception_insights.is_empty());
        assert_eq!(result.reply_options.len(), 1);
        assert_eq!(result.reply_options[0].id, "a");
        assert_eq!(result.reply_options[0].why_better, "W");
        assert_eq!(result.raw, raw);
    }

    #[test]
    fn think_block_is_removed_before_brace_slicing() {
        let raw = "<think>internal musing with { and } characters</think>{\"toneDiagnosis\":\"x\",\"perceptionInsights\":[],\"replyOptions\":[]}";
        let result = normalize_response(raw);

        assert_eq!(result.source, ResultSource::Parsed);
        assert_eq!(result.tone_diagnosis, "x");
        assert!(result.reply_options.is_empty());
    }

    #[test]
    fn think_block_spanning_lines_and_mixed_case_is_removed() {
        let cleaned = sanitize_block("<THINK>\nline {one}\nline two\n</Think>\n{\"a\":1}");
        assert_eq!(cleaned, "{\"a\":1}");
    }

    #[test]
    fn every_think_block_is_removed() {
        let cleaned = sanitize_block("<think>{</think>{\"a\":1}<think>}</think>");
        assert_eq!(cleaned, "{\"a\":1}");
    }

    #[test]
    fn uppercase_fence_markers_are_removed() {
        let cleaned = sanitize_block("```JSON\n{\"a\":1}\n```");
        assert_eq!(cleaned, "{\"a\":1}");
    }

    #[test]
    fn plain_prose_falls_back_to_raw_text() {
        let raw = "  Just tell them you are sorry and call tonight.  ";
        let result = normalize_response(raw);

        assert!(result.is_fallback());
        assert_eq!(result.tone_diagnosis, UNEXPECTED_FORMAT_DIAGNOSIS);
        assert!(result.perception_insights.is_empty());
        assert_eq!(result.reply_options.len(), 1);
        assert_eq!(result.reply_options[0].id, "raw");
        assert_eq!(
            result.reply_options[0].message,
            "Just tell them you are sorry and call tonight."
        );
        assert_eq!(result.raw, raw);
    }

    #[test]
    fn malformed_json_falls_back_with_sliced_text() {
        let result = normalize_response("Result: {\"toneDiagnosis\": \"ok\",} trailing");
        assert!(result.is_fallback());
        assert_eq!(result.reply_options[0].message, "{\"toneDiagnosis\": \"ok\",}");
    }

    #[test]
    fn braces_in_wrong_order_use_trimmed_text() {
        assert_eq!(sanitize_block("  } nothing here {  "), "} nothing here {");
    }

    #[test]
    fn non_object_json_falls_back() {
        let result = normalize_response("[1, 2, 3]");
        assert!(result.is_fallback());
    }

    #[test]
    fn missing_lists_become_empty() {
        let result = normalize_response("{\"toneDiagnosis\":\"fine\"}");
        assert_eq!(result.source, ResultSource::Parsed);
        assert!(result.perception_insights.is_empty());
        assert!(result.reply_options.is_empty());
    }

    #[test]
    fn non_list_fields_become_empty() {
        let result = normalize_response(
            "{\"toneDiagnosis\":\"fine\",\"perceptionInsights\":\"none\",\"replyOptions\":{\"id\":\"a\"}}",
        );
        assert!(result.perception_insights.is_empty());
        assert!(result.reply_options.is_empty());
    }

    #[test]
    fn missing_or_blank_diagnosis_uses_placeholder() {
        assert_eq!(normalize_response("{}").tone_diagnosis, MISSING_DIAGNOSIS);
        assert_eq!(
            normalize_response("{\"toneDiagnosis\":\"  \"}").tone_diagnosis,
            MISSING_DIAGNOSIS
        );
    }

    #[test]
    fn list_items_keep_order_and_drop_non_objects() {
        let result = normalize_response(
            r#"{"perceptionInsights":[{"hook":"h1","interpretation":"i1","reason":"r1"},"junk",{"hook":"h2"}],
                "replyOptions":[{"id":"b"},{"id":"a"}]}"#,
        );

        assert_eq!(result.perception_insights.len(), 2);
        assert_eq!(result.perception_insights[0].hook, "h1");
        assert_eq!(result.perception_insights[1].hook, "h2");
        assert_eq!(result.perception_insights[1].reason, "");
        let ids: Vec<_> = result.reply_options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
