//! Prompt construction for a coaching request.
//!
//! Rendering is deterministic: the same snapshot, draft and mode always
//! produce the same pair of instructions.

use crate::domain::memory::PreferenceSnapshot;
use crate::domain::personality::{lookup, PersonalityCode};

use super::draft::ConversationDraft;

/// Sampling temperature sent with every coaching request.
pub const COACHING_TEMPERATURE: f32 = 0.45;

/// Fixed system instruction.
pub const SYSTEM_PROMPT: &str = r#"You are a "conversation coach" who specialises in personality types.

Core task:
- Help the user turn their instinctive reply into a better chat reply.

Language and format:
- Answer in the language the user's messages are written in.
- If information is missing or uncertain, still complete the output and gently point it out in toneDiagnosis.
- Reply suggestions must read like a real person chatting in real time.
- Avoid templated, assembly-line sentences and do not pile up personality jargon; let the understanding show through the wording."#;

/// The two instructions sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachingPrompt {
    pub system: String,
    pub user: String,
}

impl CoachingPrompt {
    /// Renders the prompt pair.
    ///
    /// Focus and tone directives are only included when `advanced` is set;
    /// otherwise the model chooses them itself.
    pub fn build(snapshot: &PreferenceSnapshot, draft: &ConversationDraft, advanced: bool) -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            user: render_user_prompt(snapshot, draft, advanced),
        }
    }
}

fn describe_participant(
    name: &str,
    code: PersonalityCode,
    fallback_name: &str,
    fallback_vibe: &str,
) -> String {
    let name = if name.trim().is_empty() {
        fallback_name
    } else {
        name.trim()
    };
    match lookup(code.as_str()) {
        Some(profile) => format!("{} ({} · {}, {})", name, code, profile.archetype, profile.vibe),
        None => format!("{} ({}, {})", name, code, fallback_vibe),
    }
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Optional directive lines; empty unless the caller opted in.
fn directive_lines(draft: &ConversationDraft, advanced: bool) -> Vec<String> {
    if !advanced {
        return Vec::new();
    }
    let mut lines = Vec::new();
    if let Some(focus) = draft.focus {
        lines.push(format!("- Conversation goal: {}", focus.directive()));
    }
    if let Some(tone) = draft.tone {
        lines.push(format!("- Tone intensity: {}", tone.directive()));
    }
    lines
}

fn render_user_prompt(
    snapshot: &PreferenceSnapshot,
    draft: &ConversationDraft,
    advanced: bool,
) -> String {
    let me = describe_participant(
        &snapshot.my_name,
        snapshot.my_type,
        "me",
        "communicates with sincerity and insight",
    );
    let them = describe_participant(
        &snapshot.partner_name,
        snapshot.partner_type,
        "them",
        "values honest feedback",
    );

    let mut input = vec![
        format!(
            "- What they said: \"\"\"{}\"\"\"",
            draft.incoming_message.trim()
        ),
        format!(
            "- My instinctive reply: \"\"\"{}\"\"\"",
            draft.instinctive_reply.trim()
        ),
        format!(
            "- What I really want to get across: {}",
            draft
                .nuance_goal()
                .unwrap_or("a softer reply that gets understood")
        ),
    ];
    input.extend(directive_lines(draft, advanced));

    format!(
        r#"Background
- Me: {me}
- Them: {them}
- Relationship: {relationship}
- Memory notes: {notes}

Input
{input}

Task
1. From their original message, infer what they probably care about or worry about, and their current mood.
2. Focus the analysis on:
   - "How will they read this?" (their gut interpretation of my instinctive reply)
   - "Why would they read it that way?" (based on how our two types differ in cognitive functions and communication habits)
3. Based on that, design 1 to 3 candidate replies for me.

Requirements
- You may reason with cognitive functions (Fi, Fe, Ti, Te and so on) internally, but explain differences in everyday language in the output.
- Replies must sound like a real conversation: a form of address, details, feelings; never stiff template sentences.
- Each candidate may differ slightly in tone (more soothing / more direct / firmer boundary) so I can pick what fits my state right now.
- Keep each reply close to the length of their original message, within ±30% of it, and keep the message field under 90 characters.
- The message field contains only the words I will send to them, with no explanation.

Output JSON (no comments, no extra fields):
{{
  "toneDiagnosis": "One sentence on the opportunity and risk of the current tone; mention gently here if information is missing",
  "perceptionInsights": [
    {{
      "hook": "How will they read it? (a title of a few words, e.g. 'feeling dismissed')",
      "interpretation": "What they probably feel or conclude, in concrete everyday language",
      "reason": "Why they would think so (type differences and communication habits, in plain words)"
    }}
  ],
  "replyOptions": [
    {{
      "id": "short tag such as reassure, soft-boundary, direct-boundary (lowercase letters and hyphens)",
      "label": "Button title, e.g. 'Soothe, then explain'",
      "message": "The complete reply of at most 90 characters, only what I would send, natural and warm",
      "whyBetter": "Explain to me what this reply does for soothing, repairing the relationship and stating boundaries, as concretely as possible",
      "toneGuide": "A tone hint for me, e.g. 'gentle + sincere explanation + light boundary'"
    }}
  ]
}}

Additional requirements:
- perceptionInsights has 1 to 3 entries.
- replyOptions has 1 to 3 entries.
- If you are unsure about their reading, soften the claims in reason and toneDiagnosis with words like "maybe" or "probably"."#,
        me = me,
        them = them,
        relationship = or_fallback(&snapshot.relationship_tag, "not set"),
        notes = or_fallback(&snapshot.conversation_notes, "(nothing to add)"),
        input = input.join("\n"),
    )
}
