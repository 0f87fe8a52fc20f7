//! Shared Serde deserializers
//!
//! Environment providers parse `SENSOR_DB_PASSWORD=1234` as a number, so
//! string settings accept numbers too.

use serde::{Deserialize, Deserializer};

/// Deserialize a string that may have been given as a bare number
///
/// - `"secret"` -> "secret"
/// - `1234` -> "1234"
/// - `12.5` -> "12.5"
pub fn deserialize_string_flexible<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        UInt(u64),
        Float(f64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Int(i) => i.to_string(),
        StringOrNumber::UInt(u) => u.to_string(),
        StringOrNumber::Float(f) => f.to_string(),
    })
}
