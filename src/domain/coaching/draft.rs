//! ConversationDraft and the optional steering selectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// What the reply should mainly achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoachingFocus {
    Soothe,
    Clarify,
    CoCreate,
}

impl CoachingFocus {
    pub const ALL: [CoachingFocus; 3] = [
        CoachingFocus::Soothe,
        CoachingFocus::Clarify,
        CoachingFocus::CoCreate,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            CoachingFocus::Soothe => "soothe",
            CoachingFocus::Clarify => "clarify",
            CoachingFocus::CoCreate => "co-create",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CoachingFocus::Soothe => "Soothe first",
            CoachingFocus::Clarify => "Clear it up",
            CoachingFocus::CoCreate => "Co-create the next step",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            CoachingFocus::Soothe => "Let emotions land, then ask gently",
            CoachingFocus::Clarify => "Structured facts, kept respectful",
            CoachingFocus::CoCreate => "Stress cooperation and shared goals",
        }
    }

    /// Directive sent to the model when this focus is chosen.
    pub fn directive(&self) -> &'static str {
        match self {
            CoachingFocus::Soothe => {
                "settle the emotions first, then gently raise the boundary or need"
            }
            CoachingFocus::Clarify => {
                "lay out the facts in a structured way and clear up misunderstandings while staying respectful"
            }
            CoachingFocus::CoCreate => {
                "stress cooperation and the shared goal, and steer the energy toward the next step"
            }
        }
    }
}

impl fmt::Display for CoachingFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CoachingFocus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("focus", "expected soothe, clarify or co-create")
            })
    }
}

/// How strongly the reply should come across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToneSetting {
    Soft,
    Balanced,
    Direct,
}

impl ToneSetting {
    pub const ALL: [ToneSetting; 3] = [ToneSetting::Soft, ToneSetting::Balanced, ToneSetting::Direct];

    pub fn id(&self) -> &'static str {
        match self {
            ToneSetting::Soft => "soft",
            ToneSetting::Balanced => "balanced",
            ToneSetting::Direct => "direct",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ToneSetting::Soft => "Soft",
            ToneSetting::Balanced => "Balanced",
            ToneSetting::Direct => "Candid",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            ToneSetting::Soft => "More care, more questions",
            ToneSetting::Balanced => "Warmth and clarity together",
            ToneSetting::Direct => "Say it straight, about the issue not the person",
        }
    }

    /// Directive sent to the model when this tone is chosen.
    pub fn directive(&self) -> &'static str {
        match self {
            ToneSetting::Soft => "gentle and caring, with no sense of pressure",
            ToneSetting::Balanced => "soft yet clear, balancing respect and efficiency",
            ToneSetting::Direct => {
                "direct and candid, while staying kind to the person and firm on the issue"
            }
        }
    }
}

impl fmt::Display for ToneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToneSetting {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::invalid_format("tone", "expected soft, balanced or direct"))
    }
}

/// The message pair the user wants coaching on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationDraft {
    pub incoming_message: String,
    pub instinctive_reply: String,
    pub nuance_goal: Option<String>,
    pub focus: Option<CoachingFocus>,
    pub tone: Option<ToneSetting>,
}

impl ConversationDraft {
    pub fn new(incoming_message: impl Into<String>, instinctive_reply: impl Into<String>) -> Self {
        Self {
            incoming_message: incoming_message.into(),
            instinctive_reply: instinctive_reply.into(),
            ..Default::default()
        }
    }

    pub fn with_nuance_goal(mut self, goal: impl Into<String>) -> Self {
        self.nuance_goal = Some(goal.into());
        self
    }

    pub fn with_focus(mut self, focus: CoachingFocus) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn with_tone(mut self, tone: ToneSetting) -> Self {
        self.tone = Some(tone);
        self
    }

    /// The nuance goal, if one was given with any content.
    pub fn nuance_goal(&self) -> Option<&str> {
        self.nuance_goal
            .as_deref()
            .map(str::trim)
            .filter(|goal| !goal.is_empty())
    }

    /// Both message fields must hold something besides whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.incoming_message.trim().is_empty() {
            return Err(ValidationError::empty_field("incoming_message"));
        }
        if self.instinctive_reply.trim().is_empty() {
            return Err(ValidationError::empty_field("instinctive_reply"));
        }
        Ok(())
    }
}
