//! Static personality catalog.
//!
//! Sixteen profiles describing how each type tends to communicate, where
//! conversations with them go wrong, and what calms them down. The table is
//! immutable and ordered by quadrant (NT, NF, SJ, SP).

use serde::Serialize;

use super::code::{PersonalityCode, Quadrant};

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityProfile {
    pub code: PersonalityCode,
    pub archetype: &'static str,
    pub vibe: &'static str,
    pub conflict_style: &'static str,
    pub soothing_signal: &'static str,
    pub growth_focus: &'static str,
    pub quadrant: Quadrant,
}

/// A quadrant with its member codes, as rendered by the reference view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantGroup {
    pub quadrant: Quadrant,
    pub title: &'static str,
    pub description: &'static str,
    pub members: Vec<PersonalityCode>,
}

static CATALOG: [PersonalityProfile; 16] = [
    PersonalityProfile {
        code: PersonalityCode::Intj,
        archetype: "Night Cartographer",
        vibe: "Quiet and far-sighted; plays out the next three moves in their head before speaking.",
        conflict_style: "Disguises care as improvement suggestions, which can land as a cold verdict.",
        soothing_signal: "Offer a logical frame, say that the motive is care, then move to solutions.",
        growth_focus: "Slow down and let feelings exist instead of rushing to fix everything.",
        quadrant: Quadrant::Nt,
    },
    PersonalityProfile {
        code: PersonalityCode::Intp,
        archetype: "Insight Deconstructor",
        vibe: "Enjoys playing with concepts; takes premises and definitions apart to get clarity.",
        conflict_style: "Wears an 'actually, that doesn't follow' smile that feels like a personal rejection.",
        soothing_signal: "Acknowledge their effort first, then invite them to debug the system together.",
        growth_focus: "Translate abstract reasoning into everyday metaphors to close the distance.",
        quadrant: Quadrant::Nt,
    },
    PersonalityProfile {
        code: PersonalityCode::Entj,
        archetype: "Executive Conductor",
        vibe: "Scans for bottlenecks by instinct; fast-talking, goal-driven, good at rallying resources.",
        conflict_style: "Drops urgency straight onto the other person, which feels like orders or dismissal.",
        soothing_signal: "Name their value, express trust, then take the problem apart without blaming the person.",
        growth_focus: "Loosen the need for control and practise asking instead of directing.",
        quadrant: Quadrant::Nt,
    },
    PersonalityProfile {
        code: PersonalityCode::Entp,
        archetype: "Inspiration Hacker",
        vibe: "Forever bouncing between an idea and its counter-idea; loves debate that sparks.",
        conflict_style: "Throws out rebuttals for the fun of it and forgets the other person's emotional safety.",
        soothing_signal: "Say 'I'm on your side' first, then invite them into a playful brainstorm.",
        growth_focus: "Narrow down at the right moment and check whether the other person is ready to debate.",
        quadrant: Quadrant::Nt,
    },
    PersonalityProfile {
        code: PersonalityCode::Infj,
        archetype: "Insight Translator",
        vibe: "Picks up undercurrents of mood; speaks indirectly but longs for deep connection.",
        conflict_style: "Stores things up silently, then delivers a whole 'feelings essay' out of nowhere.",
        soothing_signal: "Open with 'I feel…' rather than 'you always…' when sharing observations.",
        growth_focus: "Ask for needs directly instead of hinting and waiting to be understood.",
        quadrant: Quadrant::Nf,
    },
    PersonalityProfile {
        code: PersonalityCode::Infp,
        archetype: "Keeper of Meaning",
        vibe: "Values sincerity and principles; gentle words, deep need to be understood.",
        conflict_style: "Retreats inward under pressure, so the outside world only sees coldness and avoidance.",
        soothing_signal: "Gently affirm their motive, invite them to describe the feeling, then talk solutions.",
        growth_focus: "Back boundaries with concrete examples so others can see where the line is.",
        quadrant: Quadrant::Nf,
    },
    PersonalityProfile {
        code: PersonalityCode::Enfj,
        archetype: "Relationship Guide",
        vibe: "Moves a group's mood with ease; habitually puts everyone else's needs first.",
        conflict_style: "Over-carries until resentment builds, then bursts out like magnified helplessness.",
        soothing_signal: "Let them say 'I need … too' and ask the other person for a concrete action.",
        growth_focus: "Practise answering half a beat later instead of rushing to a solution.",
        quadrant: Quadrant::Nf,
    },
    PersonalityProfile {
        code: PersonalityCode::Enfp,
        archetype: "Spark Summoner",
        vibe: "Warm and outgoing; senses openings and people, loves turning ideas into adventures.",
        conflict_style: "Loses precision when emotions run high, which can sound exaggerated or unreliable.",
        soothing_signal: "Steady their own pace and state the core need in short sentences.",
        growth_focus: "Build small execution rituals so inspiration lands as concrete requests.",
        quadrant: Quadrant::Nf,
    },
    PersonalityProfile {
        code: PersonalityCode::Istj,
        archetype: "Keeper of Order",
        vibe: "Steady and detail-minded; shows care through reliable action.",
        conflict_style: "Answers emotions with 'rules are rules', which comes across as rigid and cold.",
        soothing_signal: "Turn the feelings into an actionable checklist or timeline and they relax.",
        growth_focus: "Respond to the feeling first, then return to the task, or it reads as robotic.",
        quadrant: Quadrant::Sj,
    },
    PersonalityProfile {
        code: PersonalityCode::Isfj,
        archetype: "Archivist of Warmth",
        vibe: "Remembers everyone's habits; builds safety through gentle, steady care.",
        conflict_style: "Swallows hurt for a long time, then breaks down suddenly and the cause is hard to trace.",
        soothing_signal: "Affirm their effort and invite them to list a 'how can I help' menu together.",
        growth_focus: "Set boundaries and say 'no' early instead of waiting until the tank is empty.",
        quadrant: Quadrant::Sj,
    },
    PersonalityProfile {
        code: PersonalityCode::Estj,
        archetype: "Systems Executive",
        vibe: "Highly action-oriented; likes pushing processes and standards forward step by step.",
        conflict_style: "Delivers opinions as verdicts and skips over how the other person feels.",
        soothing_signal: "Explain the value behind the expectation, then ask them to fill in what's missing.",
        growth_focus: "Slow down and leave room to listen; it earns more authority, not less.",
        quadrant: Quadrant::Sj,
    },
    PersonalityProfile {
        code: PersonalityCode::Esfj,
        archetype: "Caring Coordinator",
        vibe: "Wants everyone to feel looked after; keeps things steady through a web of relationships.",
        conflict_style: "Suppresses real thoughts for harmony until they leak out as polite complaints.",
        soothing_signal: "Use concrete words instead of hints to say what feedback you hope for.",
        growth_focus: "Work out what you want first, then go take care of others.",
        quadrant: Quadrant::Sj,
    },
    PersonalityProfile {
        code: PersonalityCode::Istp,
        archetype: "Calm Tuner",
        vibe: "Reads systems sharply and likes hands-on fixes; prefers direct, concise exchanges.",
        conflict_style: "Walks out when flooded by emotion, which looks like not caring.",
        soothing_signal: "Give them space to sort things out, then reconnect with bullet-point information.",
        growth_focus: "Say 'I need a pause' out loud to cut down the mysterious disappearing act.",
        quadrant: Quadrant::Sp,
    },
    PersonalityProfile {
        code: PersonalityCode::Isfp,
        archetype: "Sensory Poet",
        vibe: "Expresses self through experience; treasures the moment and beautiful details.",
        conflict_style: "Hates open confrontation and uses distance so the other person 'just gets it'.",
        soothing_signal: "Create a gentle setting and ask 'what matters most to you right now?'.",
        growth_focus: "State boundaries in simple, plain sentences so nobody has to guess.",
        quadrant: Quadrant::Sp,
    },
    PersonalityProfile {
        code: PersonalityCode::Estp,
        archetype: "Situational Improviser",
        vibe: "Lives in the moment; great at improvising through a crisis and loves the social stage.",
        conflict_style: "Goes too hard to win the debate of the moment and neglects long-term trust.",
        soothing_signal: "Acknowledge their contribution, then look together for 'the next way to win'.",
        growth_focus: "Answer half a beat slower and don't turn honest talk into an arena.",
        quadrant: Quadrant::Sp,
    },
    PersonalityProfile {
        code: PersonalityCode::Esfp,
        archetype: "Energy Broadcaster",
        vibe: "Lights up the room with enthusiasm; highly sensitive to other people's instant reactions.",
        conflict_style: "Uses dramatic language to win back attention when feeling ignored.",
        soothing_signal: "Promise to stay connected and give a clear time or action.",
        growth_focus: "Sort out the main point and finish the message in two or three sentences.",
        quadrant: Quadrant::Sp,
    },
];

/// Typed lookup; every code has an entry.
pub fn profile(code: PersonalityCode) -> &'static PersonalityProfile {
    // CATALOG is ordered exactly like PersonalityCode::ALL.
    let index = PersonalityCode::ALL
        .iter()
        .position(|c| *c == code)
        .unwrap_or_default();
    &CATALOG[index]
}

/// Looks a profile up by its exact uppercase code. Returns `None` for
/// anything outside the fixed code set, including other casings.
pub fn lookup(code: &str) -> Option<&'static PersonalityProfile> {
    PersonalityCode::from_code(code).map(profile)
}

/// Groups the catalog into quadrants, in NT, NF, SJ, SP order.
pub fn list_groups() -> Vec<QuadrantGroup> {
    Quadrant::ALL
        .iter()
        .map(|&quadrant| QuadrantGroup {
            quadrant,
            title: quadrant.title(),
            description: quadrant.description(),
            members: CATALOG
                .iter()
                .filter(|p| p.quadrant == quadrant)
                .map(|p| p.code)
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_order_matches_code_order() {
        for (entry, code) in CATALOG.iter().zip(PersonalityCode::ALL) {
            assert_eq!(entry.code, code);
        }
    }

    #[test]
    fn lookup_returns_matching_profile_for_every_code() {
        for code in PersonalityCode::ALL {
            let found = lookup(code.as_str()).expect("every code has a profile");
            assert_eq!(found.code, code);
            assert_eq!(profile(code).code, code);
        }
    }

    #[test]
    fn lookup_rejects_unknown_codes() {
        assert!(lookup("ABCD").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("INTJX").is_none());
    }

    #[test]
    fn lookup_is_exact_about_case_and_whitespace() {
        assert!(lookup("intj").is_none());
        assert!(lookup("Intj").is_none());
        assert!(lookup(" INTJ ").is_none());
        assert!(lookup("INTJ").is_some());
    }

    #[test]
    fn groups_partition_the_code_set() {
        let groups = list_groups();
        assert_eq!(groups.len(), 4);

        let mut seen = HashSet::new();
        for group in &groups {
            assert_eq!(group.members.len(), 4);
            for member in &group.members {
                assert!(seen.insert(*member), "{} appears twice", member);
                assert_eq!(profile(*member).quadrant, group.quadrant);
            }
        }
        assert_eq!(seen.len(), PersonalityCode::ALL.len());
    }

    #[test]
    fn groups_are_in_display_order() {
        let order: Vec<_> = list_groups().iter().map(|g| g.quadrant).collect();
        assert_eq!(order, Quadrant::ALL.to_vec());
    }

    #[test]
    fn every_profile_has_text() {
        for p in CATALOG.iter() {
            assert!(!p.archetype.is_empty());
            assert!(!p.vibe.is_empty());
            assert!(!p.conflict_style.is_empty());
            assert!(!p.soothing_signal.is_empty());
            assert!(!p.growth_focus.is_empty());
        }
    }

    proptest! {
        #[test]
        fn lookup_is_none_outside_the_code_set(s in "\\PC{0,8}") {
            let known = PersonalityCode::ALL.iter().any(|c| c.as_str() == s);
            prop_assert_eq!(lookup(&s).is_some(), known);
        }

        #[test]
        fn lookup_misses_lowercase_codes(index in 0usize..16) {
            let code = PersonalityCode::ALL[index];
            prop_assert!(lookup(&code.as_str().to_lowercase()).is_none());
            prop_assert_eq!(lookup(code.as_str()).map(|p| p.code), Some(code));
        }
    }
}
