//! Custom serde helpers for exchange wire formats.

/// Deserializes a Unix-millis integer into `DateTime<Utc>`.
///
/// The exchange sends `executed_at` as epoch milliseconds, not ISO 8601
/// strings.
pub mod timestamp_ms {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis)))
    }

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(dt.timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Stamp {
        #[serde(with = "super::timestamp_ms")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_timestamp_ms_roundtrip() {
        let stamp: Stamp = serde_json::from_str(r#"{"at": 1514862245000}"#).unwrap();
        assert_eq!(stamp.at.timestamp_millis(), 1_514_862_245_000);
    }
}
