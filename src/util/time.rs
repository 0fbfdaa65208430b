use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional epoch-seconds timestamp.
///
/// The API is inconsistent about this field: older records carry the value
/// as a JSON number, newer ones as a numeric string. Both normalize to a
/// UTC datetime; out-of-range seconds become `None` rather than an error.
pub(crate) fn epoch_seconds_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Str(String),
    }

    let secs = match Option::<Raw>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Raw::Num(n)) => n,
        Some(Raw::Str(s)) => s.parse::<i64>().map_err(serde::de::Error::custom)?,
    };
    Ok(DateTime::from_timestamp(secs, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Stamped {
        #[serde(default, deserialize_with = "epoch_seconds_opt")]
        time_created: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_integer_seconds() {
        let stamped: Stamped = serde_json::from_str(r#"{"time_created":1700000000}"#).unwrap();
        assert_eq!(stamped.time_created.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_string_seconds() {
        let stamped: Stamped = serde_json::from_str(r#"{"time_created":"1700000000"}"#).unwrap();
        assert_eq!(stamped.time_created.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_missing_field_is_none() {
        let stamped: Stamped = serde_json::from_str("{}").unwrap();
        assert!(stamped.time_created.is_none());
    }

    #[test]
    fn test_null_is_none() {
        let stamped: Stamped = serde_json::from_str(r#"{"time_created":null}"#).unwrap();
        assert!(stamped.time_created.is_none());
    }

    #[test]
    fn test_non_numeric_string_is_rejected() {
        let result: Result<Stamped, _> = serde_json::from_str(r#"{"time_created":"yesterday"}"#);
        assert!(result.is_err());
    }
}
