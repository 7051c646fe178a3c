// ABOUTME: Serde helpers for optional HH:MM clock times
// ABOUTME: Accepts both HH:MM and HH:MM:SS so Postgres `time` columns round-trip

use chrono::NaiveTime;

/// Parse `HH:MM:SS` or `HH:MM`.
pub fn parse_clock_time(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
}

pub fn format_clock_time(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub mod optional_hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&super::format_clock_time(time)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => super::parse_clock_time(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Row {
        #[serde(default, with = "optional_hhmm")]
        time: Option<NaiveTime>,
    }

    #[test]
    fn test_accepts_postgres_seconds() {
        let row: Row = serde_json::from_str(r#"{"time":"09:00:00"}"#).unwrap();
        assert_eq!(row.time, NaiveTime::from_hms_opt(9, 0, 0));
    }

    #[test]
    fn test_empty_and_missing_are_none() {
        let empty: Row = serde_json::from_str(r#"{"time":""}"#).unwrap();
        let missing: Row = serde_json::from_str("{}").unwrap();
        let null: Row = serde_json::from_str(r#"{"time":null}"#).unwrap();
        assert_eq!(empty.time, None);
        assert_eq!(missing.time, None);
        assert_eq!(null.time, None);
    }

    #[test]
    fn test_serializes_without_seconds() {
        let row = Row {
            time: NaiveTime::from_hms_opt(18, 30, 0),
        };
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"time":"18:30"}"#);
    }
}
