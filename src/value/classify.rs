//! Runtime type classifiers and coercions.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use super::Value;

/// Largest magnitude (ms since epoch) a script-engine date accepts.
const MAX_EPOCH_MS: f64 = 8.64e15;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[must_use]
pub const fn is_nil(v: &Value) -> bool {
    matches!(v, Value::Null | Value::Undefined)
}

/// True for numbers, including NaN; callers decide what NaN means.
#[must_use]
pub const fn is_number(v: &Value) -> bool {
    matches!(v, Value::Number(_))
}

#[must_use]
pub const fn is_string(v: &Value) -> bool {
    matches!(v, Value::String(_))
}

#[must_use]
pub const fn is_boolean(v: &Value) -> bool {
    matches!(v, Value::Bool(_))
}

/// Structured record, not an array, date, or nil.
#[must_use]
pub const fn is_object(v: &Value) -> bool {
    matches!(v, Value::Record(_))
}

#[must_use]
pub fn is_valid_date(v: &Value) -> bool {
    to_date(v).is_some()
}

/// Interpret a value as a point in time: dates as-is, date strings parsed,
/// finite numbers as epoch milliseconds.
#[must_use]
pub fn to_date(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::Date(d) => Some(*d),
        Value::String(s) => parse_date_str(s),
        #[allow(clippy::cast_possible_truncation)]
        Value::Number(n) if n.is_finite() && n.abs() <= MAX_EPOCH_MS => {
            DateTime::from_timestamp_millis(n.trunc() as i64)
        }
        _ => None,
    }
}

pub(crate) fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.len() < 10 {
        return None;
    }
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    NAIVE_FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok()).map(|dt| dt.and_utc())
}

/// Numeric coercion: numbers, numeric strings, booleans and dates (epoch ms).
/// Nil, NaN, empty strings and containers do not coerce.
#[must_use]
pub fn coerce_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => *n,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                return None;
            }
            t.parse::<f64>().ok()?
        }
        #[allow(clippy::cast_precision_loss)]
        Value::Date(d) => d.timestamp_millis() as f64,
        _ => return None,
    };
    (!n.is_nan()).then_some(n)
}

pub(crate) fn format_iso(d: &DateTime<Utc>) -> String {
    d.to_rfc3339_opts(SecondsFormat::Millis, true)
}
