//! Tolerant field decoders for hand-authored records
//!
//! Records come out of the authoring tools partially filled in. A field that
//! is missing, `null`, or holds the wrong type decodes to its empty value
//! instead of rejecting the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null` decodes as `T::default()`
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Blank or `null` strings decode as `None`
pub fn optional_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Any number, or a numeric string. Everything else decodes as 0.0.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value).unwrap_or(0.0))
}

/// Like [`number`], but keeps "unknown" distinct from zero
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value))
}

/// Non-negative head count. Negative or malformed values decode as 0,
/// fractional values are truncated.
pub fn population<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    Ok(match value_as_f64(&value) {
        Some(n) if n > 0.0 => n.min(u64::MAX as f64) as u64,
        _ => 0,
    })
}

/// One language list per resident. A resident may be a list of names or a
/// single comma-separated string; anything else counts as a resident with no
/// known languages.
pub fn language_lists<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(residents) = value else {
        return Ok(Vec::new());
    };
    Ok(residents
        .iter()
        .map(|resident| match resident {
            Value::Array(names) => names
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Value::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        })
        .collect())
}

fn value_as_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
