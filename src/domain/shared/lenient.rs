//! Tolerant deserializers for backend payloads
//!
//! The backend is loosely typed: ids and phone numbers arrive either as JSON
//! numbers or strings, and timestamps as epoch milliseconds or date strings.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

/// Optional integer given as a number or a numeric string
pub fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("integer out of range: {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
        Some(other) => Err(de::Error::custom(format!("expected integer, got {}", other))),
    }
}

/// Required integer given as a number or a numeric string
pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_int(deserializer)?.ok_or_else(|| de::Error::custom("missing integer value"))
}

/// String given as a string or a bare number
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("expected string, got {}", other))),
    }
}

/// Optional string given as a string or a bare number
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected string, got {}", other))),
    }
}

/// Boolean flag given as `true`/`false`, `1`/`0`, or their string forms
pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().map_or(false, |v| v != 0),
        Some(Value::String(s)) => matches!(s.trim(), "true" | "1"),
        _ => false,
    })
}

/// Timestamp given as epoch milliseconds, RFC 3339, or `YYYY-MM-DD HH:MM:SS` (UTC)
pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .ok_or_else(|| de::Error::custom(format!("invalid epoch millis: {}", n)))?;
            Utc.timestamp_millis_opt(millis)
                .single()
                .ok_or_else(|| de::Error::custom(format!("epoch millis out of range: {}", millis)))
        }
        Value::String(s) => parse_timestamp(&s).ok_or_else(|| {
            de::Error::custom(format!("unrecognized timestamp format: {}", s))
        }),
        other => Err(de::Error::custom(format!("expected timestamp, got {}", other))),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_int")]
        id: Option<i64>,
        #[serde(deserialize_with = "string")]
        phone: String,
        #[serde(deserialize_with = "timestamp")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_accepts_numeric_strings_and_numbers() {
        let probe: Probe = serde_json::from_str(
            r#"{"id":"17","phone":9000000000,"at":"2025-03-01 10:15:00"}"#,
        )
        .unwrap();

        assert_eq!(probe.id, Some(17));
        assert_eq!(probe.phone, "9000000000");
        assert_eq!(probe.at.to_rfc3339(), "2025-03-01T10:15:00+00:00");
    }

    #[test]
    fn test_missing_id_and_epoch_millis() {
        let probe: Probe =
            serde_json::from_str(r#"{"phone":"9111111111","at":1700000000000}"#).unwrap();

        assert_eq!(probe.id, None);
        assert_eq!(probe.at.timestamp(), 1_700_000_000);
    }

    #[derive(Debug, Deserialize)]
    struct Envelope {
        #[serde(default, deserialize_with = "truthy")]
        success: bool,
    }

    #[test]
    fn test_truthy_success_flags() {
        let parse = |raw: &str| serde_json::from_str::<Envelope>(raw).unwrap().success;

        assert!(parse(r#"{"success":true}"#));
        assert!(parse(r#"{"success":1}"#));
        assert!(parse(r#"{"success":"true"}"#));
        assert!(!parse(r#"{"success":0}"#));
        assert!(!parse(r#"{}"#));
    }

    #[test]
    fn test_rejects_garbage_timestamp() {
        let result: Result<Probe, _> =
            serde_json::from_str(r#"{"phone":"1","at":"yesterday-ish"}"#);
        assert!(result.is_err());
    }
}
