use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bson::Bson;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::{Record, Value, classify::format_iso};

/// Largest integer an f64 represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[allow(clippy::cast_possible_truncation)]
fn as_safe_integer(n: f64) -> Option<i64> {
    (n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER).then_some(n as i64)
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match v {
            J::Null => Self::Null,
            J::Bool(b) => Self::Bool(b),
            J::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            J::String(s) => Self::String(s),
            J::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            J::Object(map) => Self::Record(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        use serde_json::Value as J;
        match v {
            Value::Undefined | Value::Null => J::Null,
            Value::Bool(b) => J::Bool(*b),
            Value::Number(n) => match as_safe_integer(*n) {
                Some(i) => J::from(i),
                None => serde_json::Number::from_f64(*n).map_or(J::Null, J::Number),
            },
            Value::String(s) => J::String(s.clone()),
            Value::Date(d) => J::String(format_iso(d)),
            Value::Array(items) => J::Array(items.iter().map(Self::from).collect()),
            Value::Record(map) => J::Object(
                map.iter()
                    .filter(|(_, v)| !matches!(v, Value::Undefined))
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        Self::from(&v)
    }
}

impl From<Bson> for Value {
    fn from(b: Bson) -> Self {
        match b {
            Bson::Null | Bson::MaxKey | Bson::MinKey => Self::Null,
            Bson::Undefined => Self::Undefined,
            Bson::Boolean(b) => Self::Bool(b),
            Bson::Int32(i) => Self::Number(f64::from(i)),
            #[allow(clippy::cast_precision_loss)]
            Bson::Int64(i) => Self::Number(i as f64),
            Bson::Double(f) => Self::Number(f),
            Bson::Decimal128(d) => Self::Number(d.to_string().parse::<f64>().unwrap_or(f64::NAN)),
            Bson::String(s) | Bson::Symbol(s) | Bson::JavaScriptCode(s) => Self::String(s),
            Bson::ObjectId(oid) => Self::String(oid.to_hex()),
            Bson::Binary(bin) => Self::String(STANDARD.encode(bin.bytes)),
            Bson::DateTime(dt) => {
                chrono::DateTime::from_timestamp_millis(dt.timestamp_millis()).map_or(Self::Null, Self::Date)
            }
            Bson::Timestamp(ts) => chrono::DateTime::from_timestamp(i64::from(ts.time), 0)
                .map_or(Self::Null, Self::Date),
            Bson::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Bson::Document(doc) => Self::from(doc),
            _ => Self::Null,
        }
    }
}

impl From<bson::Document> for Value {
    fn from(doc: bson::Document) -> Self {
        Self::Record(doc.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
    }
}

impl From<&Value> for Bson {
    fn from(v: &Value) -> Self {
        match v {
            Value::Undefined => Self::Undefined,
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(*b),
            Value::Number(n) => as_safe_integer(*n).map_or(Self::Double(*n), Self::Int64),
            Value::String(s) => Self::String(s.clone()),
            Value::Date(d) => Self::DateTime(bson::DateTime::from_millis(d.timestamp_millis())),
            Value::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Record(map) => Self::Document(record_to_document(map)),
        }
    }
}

fn record_to_document(map: &Record) -> bson::Document {
    let mut doc = bson::Document::new();
    for (k, v) in map {
        doc.insert(k.clone(), Bson::from(v));
    }
    doc
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined | Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => match as_safe_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Self::String(s) => serializer.serialize_str(s),
            Self::Date(d) => serializer.serialize_str(&format_iso(d)),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Record(map) => {
                let present = map.iter().filter(|(_, v)| !matches!(v, Self::Undefined));
                let mut out = serializer.serialize_map(None)?;
                for (k, v) in present {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_roundtrip_keeps_shape() {
        let j = json!({"a": [1, "x", null, true], "b": {"c": 2.5}});
        let v = Value::from(j.clone());
        assert_eq!(serde_json::Value::from(&v), j);
    }

    #[test]
    fn dates_serialize_as_iso_strings() {
        let d = chrono::DateTime::from_timestamp_millis(1_704_412_800_000).unwrap();
        let v: Value = [("at", Value::Date(d)), ("gone", Value::Undefined)].into_iter().collect();
        let s = serde_json::to_string(&v).unwrap();
        assert_eq!(s, r#"{"at":"2024-01-05T00:00:00.000Z"}"#);
    }

    #[test]
    fn integral_numbers_serialize_without_fraction() {
        assert_eq!(serde_json::to_string(&Value::Number(24.0)).unwrap(), "24");
        assert_eq!(serde_json::to_string(&Value::Number(2.5)).unwrap(), "2.5");
    }

    #[test]
    fn bson_document_converts() {
        let doc = bson::doc! {"n": 3_i32, "big": 5_i64, "ok": true, "nested": {"s": "x"}, "u": Bson::Undefined};
        let v = Value::from(doc);
        assert_eq!(v.get("n"), &Value::Number(3.0));
        assert_eq!(v.get("big"), &Value::Number(5.0));
        assert_eq!(v.get_path("nested.s"), &Value::from("x"));
        assert_eq!(v.get("u"), &Value::Undefined);
        let back = Bson::from(&v);
        let Bson::Document(d) = back else { panic!("expected document") };
        assert_eq!(d.get_i64("n").unwrap(), 3);
    }

    #[test]
    fn bson_datetime_becomes_date() {
        let v = Value::from(Bson::DateTime(bson::DateTime::from_millis(86_400_000)));
        assert!(matches!(v, Value::Date(d) if d.timestamp_millis() == 86_400_000));
    }
}
