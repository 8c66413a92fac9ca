//! Timestamp utilities
//!
//! Publish dates arrive as RFC 3339 strings, bare calendar dates,
//! naive date-times, or epoch milliseconds depending on the source.
//! Parsing is best-effort: anything unrecognized yields `None`.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, TimeZone, Utc};
use serde_json::Value;

/// Naive formats tried after RFC 3339, interpreted as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a publish date from a string
///
/// Tries a direct parse first, then the `<value>T00:00:00Z` reformat
/// for bare dates, then gives up. Results are truncated to milliseconds,
/// the precision [`format_iso`] writes.
///
/// # Examples
///
/// ```
/// use folio_common::time::parse_date_str;
///
/// assert!(parse_date_str("2024-03-01T10:00:00Z").is_some());
/// assert!(parse_date_str("2024-03-01").is_some());
/// assert!(parse_date_str("last tuesday").is_none());
/// ```
pub fn parse_date_str(raw: &str) -> Option<DateTime<Utc>> {
    parse_date_str_exact(raw).map(|ts| ts.trunc_subsecs(3))
}

fn parse_date_str_exact(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    DateTime::parse_from_rfc3339(&format!("{}T00:00:00Z", value))
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Parse a publish date from any JSON value
///
/// Integers are epoch milliseconds. Other non-string values yield `None`.
pub fn parse_date_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        _ => None,
    }
}

/// Format a timestamp as ISO-8601 UTC with millisecond precision
///
/// # Examples
///
/// ```
/// use folio_common::time::{format_iso, parse_date_str};
///
/// let parsed = parse_date_str("2024-03-01").unwrap();
/// assert_eq!(format_iso(&parsed), "2024-03-01T00:00:00.000Z");
/// ```
pub fn format_iso(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for `Option<DateTime<Utc>>` using [`format_iso`]
pub mod iso_millis_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&super::format_iso(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(super::parse_date_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn test_rfc3339_with_offset_converts_to_utc() {
        let parsed = parse_date_str("2024-05-01T02:00:00+02:00").unwrap();
        assert_eq!(format_iso(&parsed), "2024-05-01T00:00:00.000Z");
    }

    #[test]
    fn test_bare_date_uses_midnight_reformat() {
        let parsed = parse_date_str("2023-12-24").unwrap();
        assert_eq!(parsed.year(), 2023);
        assert_eq!(format_iso(&parsed), "2023-12-24T00:00:00.000Z");
    }

    #[test]
    fn test_naive_datetime_treated_as_utc() {
        let parsed = parse_date_str("2024-01-02 03:04:05").unwrap();
        assert_eq!(format_iso(&parsed), "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_unparseable_strings_yield_none() {
        assert!(parse_date_str("").is_none());
        assert!(parse_date_str("   ").is_none());
        assert!(parse_date_str("soon").is_none());
        assert!(parse_date_str("2024-13-45").is_none());
    }

    #[test]
    fn test_epoch_millis() {
        let parsed = parse_date_value(&json!(1_700_000_000_000i64)).unwrap();
        assert_eq!(parsed.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_non_date_values_yield_none() {
        assert!(parse_date_value(&json!(null)).is_none());
        assert!(parse_date_value(&json!(true)).is_none());
        assert!(parse_date_value(&json!({"date": "2024-01-01"})).is_none());
    }

    #[test]
    fn test_sub_millisecond_precision_truncated() {
        let parsed = parse_date_str("2022-07-15T12:30:45.123456789Z").unwrap();
        assert_eq!(format_iso(&parsed), "2022-07-15T12:30:45.123Z");
        assert_eq!(parse_date_str(&format_iso(&parsed)), Some(parsed));
    }

    #[test]
    fn test_format_is_reparseable() {
        let parsed = parse_date_str("2022-07-15T12:30:45.123Z").unwrap();
        let formatted = format_iso(&parsed);
        assert_eq!(parse_date_str(&formatted), Some(parsed));
    }
}
