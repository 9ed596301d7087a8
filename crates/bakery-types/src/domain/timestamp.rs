//! Wire format for `created_at` columns: `YYYY-MM-DD HH:MM:SS`, no fraction, no zone.
//!
//! Use as `#[serde(with = "crate::domain::timestamp")]` on `NaiveDateTime` fields.

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&ts.format(FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Parses the wire format, also accepting a trailing fractional part as
/// written by SQLite's `CURRENT_TIMESTAMP` variants.
pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S%.f")
}

pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(FORMAT).to_string()
}

/// Current UTC wall-clock time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_fixed_width() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        assert_eq!(format(&ts), "2024-01-01 09:05:03");
    }

    #[test]
    fn parse_accepts_fractional_seconds() {
        let ts = parse("2024-01-01 10:00:00.123").unwrap();
        assert_eq!(format(&ts), "2024-01-01 10:00:00");
        assert!(parse("2024-01-01T10:00:00Z").is_err());
    }

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(now().and_utc().timestamp_subsec_nanos(), 0);
    }
}
