//! Plain-text rendering for terminal output.

use std::fmt::Write;

use crate::application::StoreNotice;
use crate::domain::coaching::{CoachingFocus, CoachingResult, ToneSetting};
use crate::domain::memory::PreferenceSnapshot;
use crate::domain::personality::{profile, PersonalityProfile, QuadrantGroup};

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// One profile with its reference sections.
pub fn profile_card(entry: &PersonalityProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} · {}", entry.code, entry.archetype);
    let _ = writeln!(out, "  {}", entry.vibe);
    let _ = writeln!(out, "  Conflict blind spot: {}", entry.conflict_style);
    let _ = writeln!(out, "  Soothing key:        {}", entry.soothing_signal);
    let _ = writeln!(out, "  Growth direction:    {}", entry.growth_focus);
    out
}

/// The whole catalog, grouped by quadrant.
pub fn quadrant_overview(groups: &[QuadrantGroup]) -> String {
    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", group.title);
        let _ = writeln!(out, "{}", group.description);
        for code in &group.members {
            out.push('\n');
            out.push_str(&profile_card(profile(*code)));
        }
    }
    out
}

/// The saved relationship context.
pub fn snapshot(snapshot: &PreferenceSnapshot) -> String {
    let me = profile(snapshot.my_type);
    let them = profile(snapshot.partner_type);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Me:           {} ({} · {})",
        or_placeholder(&snapshot.my_name),
        me.code,
        me.archetype
    );
    let _ = writeln!(
        out,
        "Them:         {} ({} · {})",
        or_placeholder(&snapshot.partner_name),
        them.code,
        them.archetype
    );
    let _ = writeln!(out, "Relationship: {}", or_placeholder(&snapshot.relationship_tag));
    let _ = writeln!(out, "Notes:        {}", or_placeholder(&snapshot.conversation_notes));
    let _ = writeln!(
        out,
        "Setup:        {}",
        if snapshot.is_setup_complete {
            "complete"
        } else {
            "not done"
        }
    );
    out
}

/// The advanced selections in effect, with their captions.
pub fn steering(focus: Option<CoachingFocus>, tone: Option<ToneSetting>) -> String {
    let mut parts = Vec::new();
    if let Some(focus) = focus {
        parts.push(format!("Focus: {} ({})", focus.title(), focus.caption()));
    }
    if let Some(tone) = tone {
        parts.push(format!("Tone: {} ({})", tone.title(), tone.caption()));
    }
    if parts.is_empty() {
        "Focus and tone: left to the coach".to_string()
    } else {
        parts.join(" · ")
    }
}

/// A coaching result as sections.
pub fn coaching_result(result: &CoachingResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Tone diagnosis");
    let _ = writeln!(out, "  {}", result.tone_diagnosis);

    if !result.perception_insights.is_empty() {
        let _ = writeln!(out, "\nHow it may land");
        for insight in &result.perception_insights {
            let _ = writeln!(out, "  \"{}\"", insight.hook);
            let _ = writeln!(out, "    They may hear: {}", insight.interpretation);
            let _ = writeln!(out, "    Because: {}", insight.reason);
        }
    }

    let _ = writeln!(out, "\nReply options");
    if result.reply_options.is_empty() {
        let _ = writeln!(out, "  (none returned)");
    }
    for option in &result.reply_options {
        let _ = writeln!(out, "  [{}] {}", option.id, option.label);
        let _ = writeln!(out, "    {}", option.message);
        if !option.why_better.is_empty() {
            let _ = writeln!(out, "    Why it works: {}", option.why_better);
        }
        if !option.tone_guide.is_empty() {
            let _ = writeln!(out, "    Tone: {}", option.tone_guide);
        }
    }

    let _ = writeln!(out, "\nGenerated {}", result.created_at);

    out
}

/// One-line warning for a storage notice.
pub fn notice(notice: &StoreNotice) -> String {
    format!("warning: {}", notice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coaching::normalize_response;
    use crate::domain::personality::{list_groups, PersonalityCode};

    #[test]
    fn profile_card_has_reference_sections() {
        let card = profile_card(profile(PersonalityCode::Istp));
        assert!(card.starts_with("ISTP · "));
        assert!(card.contains("Conflict blind spot:"));
        assert!(card.contains("Soothing key:"));
        assert!(card.contains("Growth direction:"));
    }

    #[test]
    fn overview_lists_every_code_once() {
        let text = quadrant_overview(&list_groups());
        for code in PersonalityCode::ALL {
            assert_eq!(text.matches(&format!("{} · ", code)).count(), 1, "{code}");
        }
    }

    #[test]
    fn snapshot_shows_placeholders() {
        let text = snapshot(&PreferenceSnapshot::default());
        assert!(text.contains("Me:           (not set) (INFJ"));
        assert!(text.contains("Setup:        not done"));
    }

    #[test]
    fn steering_without_selection() {
        assert_eq!(steering(None, None), "Focus and tone: left to the coach");
        assert!(steering(Some(CoachingFocus::Clarify), None).starts_with("Focus: Clear it up"));
    }

    #[test]
    fn fallback_result_renders_raw_option() {
        let text = coaching_result(&normalize_response("just say sorry"));
        assert!(text.contains("[raw] View original text"));
        assert!(text.contains("just say sorry"));
        assert!(!text.contains("How it may land"));
    }

    #[test]
    fn result_footer_shows_generation_time() {
        let mut result = normalize_response("just say sorry");
        result.created_at = serde_json::from_str("\"2024-01-15T00:00:00Z\"").unwrap();

        let text = coaching_result(&result);
        assert!(text.ends_with("Generated 2024-01-15 00:00 UTC\n"));
    }
}
