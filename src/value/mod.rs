//! Tagged runtime value shared by criteria operands and records.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

pub mod classify;
mod convert;

pub use classify::{
    coerce_number, is_boolean, is_nil, is_number, is_object, is_string, is_valid_date, to_date,
};

pub type Record = BTreeMap<String, Value>;

static UNDEFINED: Value = Value::Undefined;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent field; distinct from an explicit `Null`.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Record(Record),
}

impl Value {
    #[must_use]
    pub fn record() -> Self {
        Self::Record(Record::new())
    }

    /// Property access. Missing keys and non-container values yield `Undefined`.
    /// Numeric keys index into arrays.
    #[must_use]
    pub fn get(&self, key: &str) -> &Self {
        match self {
            Self::Record(map) => map.get(key).unwrap_or(&UNDEFINED),
            Self::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)).unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    /// Dotted-path access (`profile.name`). A key that literally contains dots wins over the path.
    #[must_use]
    pub fn get_path(&self, path: &str) -> &Self {
        if let Self::Record(map) = self
            && let Some(v) = map.get(path)
        {
            return v;
        }
        let mut cur = self;
        for (depth, seg) in path.split('.').enumerate() {
            if depth >= MAX_PATH_DEPTH {
                return &UNDEFINED;
            }
            cur = cur.get(seg);
            if matches!(cur, Self::Undefined) {
                break;
            }
        }
        cur
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Array(_) => "array",
            Self::Record(_) => "record",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(map) => Some(map),
            _ => None,
        }
    }

    /// String form used for coercion and cross-type ordering.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_string(),
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.clone(),
            Self::Date(d) => classify::format_iso(d),
            Self::Array(items) => items
                .iter()
                .map(|v| if is_nil(v) { String::new() } else { v.to_display_string() })
                .collect::<Vec<_>>()
                .join(","),
            Self::Record(_) => "[object Object]".to_string(),
        }
    }
}

const MAX_PATH_DEPTH: usize = 32;

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else {
        format!("{n}")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<Record> for Value {
    fn from(map: Record) -> Self {
        Self::Record(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iter: I) -> Self {
        Self::Record(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_missing_is_undefined() {
        let v = Value::from(json!({"a": 1}));
        assert_eq!(v.get("a"), &Value::Number(1.0));
        assert_eq!(v.get("b"), &Value::Undefined);
        assert_eq!(Value::Number(3.0).get("a"), &Value::Undefined);
    }

    #[test]
    fn get_indexes_arrays() {
        let v = Value::from(json!(["x", "y"]));
        assert_eq!(v.get("1"), &Value::from("y"));
        assert_eq!(v.get("7"), &Value::Undefined);
        assert_eq!(v.get("len"), &Value::Undefined);
    }

    #[test]
    fn get_path_walks_nested_records() {
        let v = Value::from(json!({"profile": {"name": "ada"}, "a.b": 5}));
        assert_eq!(v.get_path("profile.name"), &Value::from("ada"));
        assert_eq!(v.get_path("a.b"), &Value::Number(5.0));
        assert_eq!(v.get_path("profile.missing.deeper"), &Value::Undefined);
    }

    #[test]
    fn display_string_follows_script_conventions() {
        assert_eq!(Value::Number(1.0).to_display_string(), "1");
        assert_eq!(Value::Number(1.5).to_display_string(), "1.5");
        assert_eq!(Value::Number(f64::INFINITY).to_display_string(), "Infinity");
        assert_eq!(Value::from(vec![1, 2]).to_display_string(), "1,2");
        assert_eq!(Value::record().to_display_string(), "[object Object]");
    }
}
