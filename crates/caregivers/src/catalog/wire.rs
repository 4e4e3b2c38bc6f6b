use chrono::NaiveTime;
use serde::{Deserialize, Deserializer};

pub(crate) fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|err| format!("failed to parse '{raw}' as HH:MM or HH:MM:SS ({err})"))
}

pub(crate) fn deserialize_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_time<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_time(&value).map_err(serde::de::Error::custom))
        .transpose()
}

/// Absent fields stay `None` through `#[serde(default)]`; an explicit `null` becomes
/// `Some(None)` so partial updates can clear a column.
pub(crate) fn deserialize_nullable<'de, D, T>(
    deserializer: D,
) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minutes_and_seconds_precision() {
        let expected = NaiveTime::from_hms_opt(9, 30, 0).expect("valid time");
        assert_eq!(parse_time("09:30"), Ok(expected));
        assert_eq!(parse_time("09:30:00"), Ok(expected));
        assert!(parse_time("half past nine").is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_nullable")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn null_is_kept_apart_from_an_absent_field() {
        let absent: Patch = serde_json::from_str("{}").expect("parses");
        let cleared: Patch = serde_json::from_str(r#"{"notes": null}"#).expect("parses");
        let set: Patch = serde_json::from_str(r#"{"notes": "bring keys"}"#).expect("parses");

        assert_eq!(absent.notes, None);
        assert_eq!(cleared.notes, Some(None));
        assert_eq!(set.notes, Some(Some("bring keys".to_string())));
    }
}
