//! PreferenceSnapshot - the user's persisted relationship context.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::personality::PersonalityCode;

/// Storage key of the durable record.
pub const STORAGE_KEY: &str = "MBTI_CHAT_MEMORY_V1";

/// Relationship tag used until the user picks one.
pub const DEFAULT_RELATIONSHIP_TAG: &str = "creative partner";

/// Names, personality codes and notes describing both participants.
///
/// Serialized with the camelCase field names of the durable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSnapshot {
    pub my_name: String,
    #[serde(rename = "myMbti")]
    pub my_type: PersonalityCode,
    pub partner_name: String,
    #[serde(rename = "partnerMbti")]
    pub partner_type: PersonalityCode,
    pub relationship_tag: String,
    pub conversation_notes: String,
    pub is_setup_complete: bool,
}

impl Default for PreferenceSnapshot {
    fn default() -> Self {
        Self {
            my_name: String::new(),
            my_type: PersonalityCode::Infj,
            partner_name: String::new(),
            partner_type: PersonalityCode::Entp,
            relationship_tag: DEFAULT_RELATIONSHIP_TAG.to_string(),
            conversation_notes: String::new(),
            is_setup_complete: false,
        }
    }
}

impl PreferenceSnapshot {
    /// Rebuilds a snapshot from a stored JSON object, tolerating older and
    /// partially broken shapes.
    ///
    /// Missing or mistyped fields keep their defaults and unknown personality
    /// codes fall back to the default code. Records written before the setup
    /// flag existed infer it from the identity fields; a record holding only
    /// notes therefore still counts as "not set up".
    pub fn from_stored(record: &Map<String, Value>) -> Self {
        let defaults = Self::default();

        let text = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);
        let code = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .and_then(PersonalityCode::from_code)
        };

        let my_name = text("myName");
        let partner_name = text("partnerName");
        let relationship_tag = text("relationshipTag");

        let is_setup_complete = match record.get("isSetupComplete").and_then(Value::as_bool) {
            Some(flag) => flag,
            None => [&my_name, &partner_name, &relationship_tag]
                .iter()
                .any(|field| field.as_deref().is_some_and(|v| !v.is_empty())),
        };

        Self {
            my_name: my_name.unwrap_or(defaults.my_name),
            my_type: code("myMbti").unwrap_or(defaults.my_type),
            partner_name: partner_name.unwrap_or(defaults.partner_name),
            partner_type: code("partnerMbti").unwrap_or(defaults.partner_type),
            relationship_tag: relationship_tag.unwrap_or(defaults.relationship_tag),
            conversation_notes: text("conversationNotes").unwrap_or(defaults.conversation_notes),
            is_setup_complete,
        }
    }

    /// Shallow merge: every field set in the patch overwrites, the rest stay.
    pub fn apply(&mut self, patch: &PreferencePatch) {
        if let Some(ref v) = patch.my_name {
            self.my_name = v.clone();
        }
        if let Some(v) = patch.my_type {
            self.my_type = v;
        }
        if let Some(ref v) = patch.partner_name {
            self.partner_name = v.clone();
        }
        if let Some(v) = patch.partner_type {
            self.partner_type = v;
        }
        if let Some(ref v) = patch.relationship_tag {
            self.relationship_tag = v.clone();
        }
        if let Some(ref v) = patch.conversation_notes {
            self.conversation_notes = v.clone();
        }
        if let Some(v) = patch.is_setup_complete {
            self.is_setup_complete = v;
        }
    }

    /// Returns a copy with the patch applied.
    pub fn merged(&self, patch: &PreferencePatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

/// Partial update of a [`PreferenceSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencePatch {
    pub my_name: Option<String>,
    pub my_type: Option<PersonalityCode>,
    pub partner_name: Option<String>,
    pub partner_type: Option<PersonalityCode>,
    pub relationship_tag: Option<String>,
    pub conversation_notes: Option<String>,
    pub is_setup_complete: Option<bool>,
}

impl PreferencePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_my_name(mut self, name: impl Into<String>) -> Self {
        self.my_name = Some(name.into());
        self
    }

    pub fn with_my_type(mut self, code: PersonalityCode) -> Self {
        self.my_type = Some(code);
        self
    }

    pub fn with_partner_name(mut self, name: impl Into<String>) -> Self {
        self.partner_name = Some(name.into());
        self
    }

    pub fn with_partner_type(mut self, code: PersonalityCode) -> Self {
        self.partner_type = Some(code);
        self
    }

    pub fn with_relationship_tag(mut self, tag: impl Into<String>) -> Self {
        self.relationship_tag = Some(tag.into());
        self
    }

    pub fn with_conversation_notes(mut self, notes: impl Into<String>) -> Self {
        self.conversation_notes = Some(notes.into());
        self
    }

    pub fn with_setup_complete(mut self, complete: bool) -> Self {
        self.is_setup_complete = Some(complete);
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
