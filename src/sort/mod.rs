//! Deterministic multi-key sort over records.

pub mod collate;

use std::cmp::Ordering;
use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Field name or dotted path.
    pub field: String,
    pub order: Order,
}

/// Ordered sort keys; the first key is the primary one.
///
/// Serializes as a map (`{"a": "asc"}`); deserializes from a map or an array of maps
/// (`[{"a": "asc"}, {"b": "desc"}]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec(Vec<SortKey>);

impl SortSpec {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn asc(self, field: impl Into<String>) -> Self {
        self.then(field, Order::Asc)
    }

    #[must_use]
    pub fn desc(self, field: impl Into<String>) -> Self {
        self.then(field, Order::Desc)
    }

    #[must_use]
    pub fn then(mut self, field: impl Into<String>, order: Order) -> Self {
        self.0.push(SortKey { field: field.into(), order });
        self
    }

    #[must_use]
    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Order)> for SortSpec {
    fn from_iter<I: IntoIterator<Item = (S, Order)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(field, order)| SortKey { field: field.into(), order }).collect())
    }
}

impl Serialize for SortSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for key in &self.0 {
            map.serialize_entry(&key.field, &key.order)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SortSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SpecVisitor;

        impl<'de> Visitor<'de> for SpecVisitor {
            type Value = SortSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field to direction, or an array of such maps")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SortSpec, A::Error> {
                let mut keys = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((field, order)) = access.next_entry::<String, Order>()? {
                    keys.push(SortKey { field, order });
                }
                Ok(SortSpec(keys))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<SortSpec, A::Error> {
                let mut keys = Vec::new();
                while let Some(SortSpec(part)) = access.next_element::<SortSpec>()? {
                    keys.extend(part);
                }
                Ok(SortSpec(keys))
            }
        }

        deserializer.deserialize_any(SpecVisitor)
    }
}

/// Single-key comparator: `value < undefined < null`, then same-type ordering, then
/// a lower-cased string comparison for mixed types.
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Undefined, _) => Ordering::Greater,
        (_, Value::Undefined) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => {
            x.partial_cmp(y).unwrap_or_else(|| x.is_nan().cmp(&y.is_nan()))
        }
        (Value::String(x), Value::String(y)) => collate::compare(x, y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Date(x), Value::Date(y)) => x.cmp(y),
        _ => a.to_display_string().to_lowercase().cmp(&b.to_display_string().to_lowercase()),
    }
}

/// Multi-key comparator. The first key with a non-equal result decides.
#[must_use]
pub fn compare_records(a: &Value, b: &Value, spec: &SortSpec) -> Ordering {
    for key in &spec.0 {
        let ord = compare_values(a.get_path(&key.field), b.get_path(&key.field));
        if ord != Ordering::Equal {
            return match key.order {
                Order::Asc => ord,
                Order::Desc => ord.reverse(),
            };
        }
    }
    Ordering::Equal
}

/// Stable in-place sort. An empty spec leaves the order untouched.
pub fn sort(items: &mut [Value], spec: &SortSpec) {
    if items.len() < 2 || spec.is_empty() {
        return;
    }
    let order = merge_order(items.len(), |a, b| compare_records(&items[a], &items[b], spec));
    let mut taken: Vec<Value> = items.iter_mut().map(std::mem::take).collect();
    for (slot, i) in items.iter_mut().zip(order) {
        *slot = std::mem::take(&mut taken[i]);
    }
}

/// Stable sort over borrowed records, keeping element identity.
pub fn sort_refs(items: &mut [&Value], spec: &SortSpec) {
    if items.len() < 2 || spec.is_empty() {
        return;
    }
    let order = merge_order(items.len(), |a, b| compare_records(items[a], items[b], spec));
    let original = items.to_vec();
    for (slot, i) in items.iter_mut().zip(order) {
        *slot = original[i];
    }
}

/// Bottom-up merge sort of indices `0..len`.
///
/// Cross-type comparisons are not transitive (`10 < "5" < 9 < 10`), which `slice::sort_by`
/// may panic on. A merge never does; it just yields some stable arrangement.
fn merge_order(len: usize, cmp: impl Fn(usize, usize) -> Ordering) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    let mut buf = vec![0; len];
    let mut width = 1;
    while width < len {
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j) = (start, mid);
            for slot in &mut buf[start..end] {
                if j >= end || (i < mid && cmp(order[i], order[j]) != Ordering::Greater) {
                    *slot = order[i];
                    i += 1;
                } else {
                    *slot = order[j];
                    j += 1;
                }
            }
        }
        std::mem::swap(&mut order, &mut buf);
        width *= 2;
    }
    order
}

#[must_use]
pub fn sorted(mut items: Vec<Value>, spec: &SortSpec) -> Vec<Value> {
    sort(&mut items, spec);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vals(j: serde_json::Value) -> Vec<Value> {
        match Value::from(j) {
            Value::Array(items) => items,
            other => vec![other],
        }
    }

    #[test]
    fn sentinel_ladder() {
        assert_eq!(compare_values(&Value::Number(1.0), &Value::Undefined), Ordering::Less);
        assert_eq!(compare_values(&Value::Undefined, &Value::Null), Ordering::Less);
        assert_eq!(compare_values(&Value::Null, &Value::Null), Ordering::Equal);
        assert_eq!(compare_values(&Value::Null, &Value::from("z")), Ordering::Greater);
    }

    #[test]
    fn mixed_types_compare_as_lowercase_text() {
        assert_eq!(compare_values(&Value::Number(10.0), &Value::from("9")), Ordering::Less);
        assert_eq!(compare_values(&Value::Bool(true), &Value::from("TRUE")), Ordering::Equal);
    }

    #[test]
    fn nan_sorts_after_numbers() {
        assert_eq!(compare_values(&Value::Number(f64::NAN), &Value::Number(1.0)), Ordering::Greater);
        assert_eq!(compare_values(&Value::Number(f64::NAN), &Value::Number(f64::NAN)), Ordering::Equal);
    }

    #[test]
    fn secondary_key_breaks_ties() {
        let mut items = vals(json!([{"a": 1, "b": 2}, {"a": 0, "b": 9}, {"a": 1, "b": 1}]));
        sort(&mut items, &SortSpec::new().asc("a").desc("b"));
        let got: Vec<_> = items.iter().map(|v| v.get("b").clone()).collect();
        assert_eq!(got, vec![Value::Number(9.0), Value::Number(2.0), Value::Number(1.0)]);
    }

    #[test]
    fn dotted_paths() {
        let mut items = vals(json!([{"p": {"n": "b"}}, {"p": {"n": "a"}}]));
        sort(&mut items, &SortSpec::new().asc("p.n"));
        assert_eq!(items[0].get_path("p.n"), &Value::from("a"));
    }

    #[test]
    fn mixed_numbers_and_numeric_strings_do_not_panic() {
        let mut items: Vec<Value> = (0..64)
            .map(|i| {
                let k = (i * 7) % 13;
                if i % 3 == 0 { json!({"k": k.to_string(), "i": i}) } else { json!({"k": k, "i": i}) }
            })
            .map(Value::from)
            .collect();
        sort(&mut items, &SortSpec::new().asc("k"));
        assert_eq!(items.len(), 64);
    }

    #[test]
    fn merge_order_is_stable() {
        let keys = [2, 1, 2, 0, 1, 2, 0];
        let order = merge_order(keys.len(), |a, b| keys[a].cmp(&keys[b]));
        assert_eq!(order, vec![3, 6, 1, 4, 0, 2, 5]);
    }

    #[test]
    fn spec_serde_keeps_order() {
        let spec: SortSpec = serde_json::from_value(json!({"b": "desc", "a": "asc"})).unwrap();
        assert_eq!(spec, SortSpec::new().desc("b").asc("a"));
        let spec: SortSpec = serde_json::from_value(json!([{"z": "asc"}, {"y": "DESC"}])).unwrap();
        assert_eq!(spec, SortSpec::new().asc("z").desc("y"));
        assert_eq!(serde_json::to_value(&spec).unwrap(), json!({"z": "asc", "y": "desc"}));
        assert!(serde_json::from_value::<SortSpec>(json!({"a": "sideways"})).is_err());
    }
}
