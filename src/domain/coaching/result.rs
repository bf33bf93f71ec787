//! CoachingResult and its parts.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// How the other person is likely to read the instinctive reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerceptionInsight {
    pub hook: String,
    pub interpretation: String,
    pub reason: String,
}

/// One candidate reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplyOption {
    pub id: String,
    pub label: String,
    pub message: String,
    pub why_better: String,
    pub tone_guide: String,
}

/// Whether the model output was decoded or passed through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// The structured payload decoded.
    Parsed,
    /// The payload did not decode; the single reply option carries the raw text.
    RawFallback,
}

/// Fully-formed outcome of one coaching request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingResult {
    pub tone_diagnosis: String,
    pub perception_insights: Vec<PerceptionInsight>,
    pub reply_options: Vec<ReplyOption>,
    pub raw: String,
    pub created_at: Timestamp,
    pub source: ResultSource,
}

impl CoachingResult {
    pub fn is_fallback(&self) -> bool {
        self.source == ResultSource::RawFallback
    }

    /// Finds a reply option by id.
    pub fn reply(&self, id: &str) -> Option<&ReplyOption> {
        self.reply_options.iter().find(|option| option.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_options(ids: &[&str]) -> CoachingResult {
        CoachingResult {
            tone_diagnosis: "ok".to_string(),
            perception_insights: Vec::new(),
            reply_options: ids
                .iter()
                .map(|id| ReplyOption {
                    id: id.to_string(),
                    ..Default::default()
                })
                .collect(),
            raw: String::new(),
            created_at: Timestamp::now(),
            source: ResultSource::Parsed,
        }
    }

    #[test]
    fn reply_finds_option_by_id() {
        let result = result_with_options(&["reassure", "soft-boundary"]);
        assert_eq!(result.reply("soft-boundary").unwrap().id, "soft-boundary");
        assert!(result.reply("missing").is_none());
    }

    #[test]
    fn result_serializes_camel_case() {
        let json = serde_json::to_value(result_with_options(&["a"])).unwrap();
        assert!(json.get("toneDiagnosis").is_some());
        assert!(json.get("replyOptions").is_some());
        assert_eq!(json["source"], "parsed");
    }

    #[test]
    fn reply_option_tolerates_missing_fields() {
        let option: ReplyOption = serde_json::from_str(r#"{"id":"a","message":"M"}"#).unwrap();
        assert_eq!(option.message, "M");
        assert_eq!(option.why_better, "");
    }
}
