use serde::{Deserialize, Deserializer};

/// Deserializes an optional integer that may arrive as an empty string.
///
/// Query-style inputs routinely encode "not set" as `""`; both that and an
/// absent value map to `None`.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
