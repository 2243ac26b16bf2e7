//! Lenient timestamp parsing.
//!
//! Timestamps are written as RFC 3339, but documents created by older
//! deployments and some clients send naive ISO-8601 date-times with no
//! offset. Those are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// `deserialize_with` adapter for [`parse`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rstest::rstest;

    #[rstest]
    #[case("2024-05-01T10:30:00Z")]
    #[case("2024-05-01T12:30:00+02:00")]
    #[case("2024-05-01T10:30:00")]
    #[case("2024-05-01T10:30:00.123456")]
    #[case("2024-05-01 10:30:00")]
    fn test_parse_accepts_known_formats(#[case] input: &str) {
        let dt = parse(input).unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[rstest]
    #[case("")]
    #[case("yesterday")]
    #[case("2024-13-01T00:00:00")]
    fn test_parse_rejects_garbage(#[case] input: &str) {
        assert!(parse(input).is_none());
    }
}
