//! Lenient decoding helpers for rows coming from the hosted store
//!
//! Columns are written by many screens and manual edits, so the same numeric
//! field may arrive as a number, a numeric string, or null. Anything that
//! doesn't parse as a finite number decodes as zero. JSON columns may arrive
//! as an object or as a JSON-encoded string.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value into a finite f64 (anything else becomes 0.0)
pub fn value_to_f64(value: &Value) -> f64 {
    parse_f64(value).unwrap_or(0.0)
}

/// Coerce a JSON value into an i64, truncating fractional quantities
pub fn value_to_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or_else(|| value_to_f64(value) as i64),
        _ => value_to_f64(value) as i64,
    }
}

fn parse_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Decode a JSON value that may have been stored as an encoded string.
///
/// Strings that don't decode are kept verbatim.
pub fn decode_json_string(value: Value) -> Value {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                serde_json::from_str(trimmed).unwrap_or(Value::String(s))
            } else {
                Value::String(s)
            }
        }
        other => other,
    }
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a timestamp in the shapes Postgres hands back
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

// ============================================================================
// serde `deserialize_with` adapters
// ============================================================================

pub fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().map(value_to_f64).unwrap_or(0.0))
}

/// Like [`lenient_f64`] but keeps "absent" distinct from zero
pub fn lenient_opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(parse_f64))
}

pub fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().map(value_to_i64).unwrap_or(0))
}

/// Identifier columns: accept strings and numbers
pub fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Value::deserialize(d)?;
    value_to_string(value).ok_or_else(|| D::Error::custom("expected a non-empty string or number"))
}

pub fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.and_then(value_to_string))
}

/// Size → quantity maps, preserving the stored key order
pub fn lenient_quantities<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<IndexMap<String, i64>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(object_entries(value)
        .map(|(k, v)| (k, value_to_i64(&v)))
        .collect())
}

/// Size → price maps, preserving the stored key order
pub fn lenient_prices<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<IndexMap<String, f64>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(object_entries(value)
        .filter_map(|(k, v)| parse_f64(&v).map(|price| (k, price)))
        .collect())
}

fn object_entries(value: Option<Value>) -> impl Iterator<Item = (String, Value)> {
    let map = match value.map(decode_json_string) {
        Some(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    map.into_iter()
}

/// Size label lists: a JSON array or a comma separated string
pub fn lenient_labels<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?.map(decode_json_string);
    let labels = match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(value_to_string).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    Ok(labels)
}

/// Lists inside JSON bags: null or a non-array decodes as empty, and
/// elements that don't decode as `T` are skipped
pub fn lenient_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(d)?.map(decode_json_string);
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if decoded.len() < total {
        tracing::warn!(
            skipped = total - decoded.len(),
            "Skipped list elements that failed to decode"
        );
    }
    Ok(decoded)
}

/// JSON columns stored either as objects or as encoded strings
pub fn json_or_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.map(decode_json_string).filter(|v| !v.is_null()))
}

pub fn lenient_datetime<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => parse_timestamp(&s),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

/// Date columns: plain dates or full timestamps (date part kept)
pub fn lenient_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .ok()
            .or_else(|| parse_timestamp(&s).map(|dt| dt.date_naive())),
        _ => None,
    })
}
