//! Timestamp value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point in time a coaching result was produced, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M UTC"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mid_january() -> Timestamp {
        Timestamp(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
    }

    #[test]
    fn now_is_after_a_past_instant() {
        assert!(Timestamp::now() > mid_january());
    }

    #[test]
    fn result_time_serializes_as_rfc3339() {
        let json = serde_json::to_string(&mid_january()).unwrap();
        assert!(json.starts_with("\"2024-01-15T00:00:00"));
    }

    #[test]
    fn displays_minutes_in_utc() {
        assert_eq!(mid_january().to_string(), "2024-01-15 00:00 UTC");
    }
}
