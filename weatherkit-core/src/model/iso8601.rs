//! Strict ISO-8601 timestamp codec used by every wire model.
//!
//! Dates are accepted only as internet date-times at second precision
//! (`2024-05-01T12:00:00Z` or `2024-05-01T14:00:00+02:00`) and always
//! normalized to UTC. Fractional seconds, a space or lowercase separator and a
//! lowercase `z` are decode errors. Outgoing query parameters use the same
//! format.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Debug, thiserror::Error)]
pub enum DateError {
    #[error("expected YYYY-MM-DDTHH:MM:SS followed by Z or an offset")]
    Shape,

    #[error(transparent)]
    Invalid(#[from] chrono::ParseError),
}

pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn parse(value: &str) -> Result<DateTime<Utc>, DateError> {
    if !is_internet_date_time(value.as_bytes()) {
        return Err(DateError::Shape);
    }
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

fn is_internet_date_time(b: &[u8]) -> bool {
    let digits = |from: usize, to: usize| b[from..to].iter().all(u8::is_ascii_digit);

    let head = b.len() >= 20
        && digits(0, 4)
        && b[4] == b'-'
        && digits(5, 7)
        && b[7] == b'-'
        && digits(8, 10)
        && b[10] == b'T'
        && digits(11, 13)
        && b[13] == b':'
        && digits(14, 16)
        && b[16] == b':'
        && digits(17, 19);
    if !head {
        return false;
    }

    match &b[19..] {
        b"Z" => true,
        [sign, ..] if b.len() == 25 => {
            matches!(sign, b'+' | b'-') && digits(20, 22) && b[22] == b':' && digits(23, 25)
        }
        _ => false,
    }
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid ISO-8601 date '{raw}': {e}")))
}

/// Same codec for optional fields. Use together with `#[serde(default)]`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => super::serialize(dt, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse(&raw).map(Some).map_err(|e| {
                serde::de::Error::custom(format!("invalid ISO-8601 date '{raw}': {e}"))
            }),
            None => Ok(None),
        }
    }
}
