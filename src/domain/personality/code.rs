//! PersonalityCode and Quadrant enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The 16 four-letter personality codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PersonalityCode {
    Intj,
    Intp,
    Entj,
    Entp,
    Infj,
    Infp,
    Enfj,
    Enfp,
    Istj,
    Isfj,
    Estj,
    Esfj,
    Istp,
    Isfp,
    Estp,
    Esfp,
}

impl PersonalityCode {
    /// Every code, in catalog order.
    pub const ALL: [PersonalityCode; 16] = [
        PersonalityCode::Intj,
        PersonalityCode::Intp,
        PersonalityCode::Entj,
        PersonalityCode::Entp,
        PersonalityCode::Infj,
        PersonalityCode::Infp,
        PersonalityCode::Enfj,
        PersonalityCode::Enfp,
        PersonalityCode::Istj,
        PersonalityCode::Isfj,
        PersonalityCode::Estj,
        PersonalityCode::Esfj,
        PersonalityCode::Istp,
        PersonalityCode::Isfp,
        PersonalityCode::Estp,
        PersonalityCode::Esfp,
    ];

    /// Returns the uppercase four-letter code.
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityCode::Intj => "INTJ",
            PersonalityCode::Intp => "INTP",
            PersonalityCode::Entj => "ENTJ",
            PersonalityCode::Entp => "ENTP",
            PersonalityCode::Infj => "INFJ",
            PersonalityCode::Infp => "INFP",
            PersonalityCode::Enfj => "ENFJ",
            PersonalityCode::Enfp => "ENFP",
            PersonalityCode::Istj => "ISTJ",
            PersonalityCode::Isfj => "ISFJ",
            PersonalityCode::Estj => "ESTJ",
            PersonalityCode::Esfj => "ESFJ",
            PersonalityCode::Istp => "ISTP",
            PersonalityCode::Isfp => "ISFP",
            PersonalityCode::Estp => "ESTP",
            PersonalityCode::Esfp => "ESFP",
        }
    }

    /// Exact match against the uppercase code.
    pub fn from_code(value: &str) -> Option<PersonalityCode> {
        Self::ALL.iter().copied().find(|code| code.as_str() == value)
    }

    /// Parses user input, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<PersonalityCode> {
        let wanted = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for PersonalityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonalityCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            ValidationError::invalid_format(
                "personality_code",
                format!("'{}' is not one of the 16 personality codes", s),
            )
        })
    }
}

/// The four thematic groupings of personality codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Quadrant {
    Nt,
    Nf,
    Sj,
    Sp,
}

impl Quadrant {
    /// Quadrants in display order.
    pub const ALL: [Quadrant; 4] = [Quadrant::Nt, Quadrant::Nf, Quadrant::Sj, Quadrant::Sp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::Nt => "NT",
            Quadrant::Nf => "NF",
            Quadrant::Sj => "SJ",
            Quadrant::Sp => "SP",
        }
    }

    /// Heading shown on the reference view.
    pub fn title(&self) -> &'static str {
        match self {
            Quadrant::Nt => "NT · Strategy & Structure",
            Quadrant::Nf => "NF · Empathy & Meaning",
            Quadrant::Sj => "SJ · Stability & Order",
            Quadrant::Sp => "SP · Experience & Agility",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Quadrant::Nt => {
                "Driven by logic and vision; craves efficiency, precision and long-term impact."
            }
            Quadrant::Nf => {
                "Puts people and values first; words carry emotional warmth and idealism."
            }
            Quadrant::Sj => {
                "Guards daily life through duty and memory; seeks safety, reliability and predictability."
            }
            Quadrant::Sp => {
                "Iterates inside the moment; values flexibility, the senses and real-world feedback."
            }
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_16_distinct_codes() {
        let mut seen = std::collections::HashSet::new();
        for code in PersonalityCode::ALL {
            assert!(seen.insert(code));
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(PersonalityCode::parse(" infj "), Some(PersonalityCode::Infj));
        assert_eq!(PersonalityCode::parse("EnTp"), Some(PersonalityCode::Entp));
        assert_eq!(PersonalityCode::parse("XXXX"), None);
        assert_eq!(PersonalityCode::parse(""), None);
    }

    #[test]
    fn from_code_requires_exact_uppercase() {
        assert_eq!(PersonalityCode::from_code("INFJ"), Some(PersonalityCode::Infj));
        assert_eq!(PersonalityCode::from_code("infj"), None);
        assert_eq!(PersonalityCode::from_code(" INFJ"), None);
    }

    #[test]
    fn from_str_reports_invalid_code() {
        let err = "ABCD".parse::<PersonalityCode>().unwrap_err();
        assert_eq!(err.field(), Some("personality_code"));
    }

    #[test]
    fn display_matches_as_str() {
        for code in PersonalityCode::ALL {
            assert_eq!(code.to_string(), code.as_str());
        }
    }

    #[test]
    fn code_serializes_uppercase() {
        let json = serde_json::to_string(&PersonalityCode::Isfp).unwrap();
        assert_eq!(json, "\"ISFP\"");

        let code: PersonalityCode = serde_json::from_str("\"ESTJ\"").unwrap();
        assert_eq!(code, PersonalityCode::Estj);
    }

    #[test]
    fn quadrant_serializes_uppercase() {
        let json = serde_json::to_string(&Quadrant::Sj).unwrap();
        assert_eq!(json, "\"SJ\"");
    }
}
