//! Lenient deserializers for upstream inspection data.
//!
//! Upstream exports are loose: dates arrive as plain dates or ISO timestamps,
//! and text columns may be `null`. Neither should fail a whole import.

use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Parse `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS[.fff]`, keeping only the date.
pub fn parse_lenient_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// A date cell as exported: text, or any other value we discard.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Other(IgnoredAny),
}

/// Deserialize an optional date. Malformed strings and non-string values
/// (numbers, booleans, objects) become `None` instead of failing the record.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawDate> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawDate::Text(text)) => parse_lenient_date(&text),
        Some(RawDate::Other(_)) | None => None,
    })
}

/// Deserialize a string that may be `null`.
pub fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}
