//! Comparators that never fail: incomparable inputs come back as `None`.

use std::cmp::Ordering;

use crate::value::{Value, coerce_number, to_date};

use super::types::CaseMode;

/// Structural equality, folding case for string pairs when asked to.
pub(crate) fn values_equal(a: &Value, b: &Value, case: CaseMode) -> bool {
    match (a, b, case) {
        (Value::String(x), Value::String(y), CaseMode::Insensitive) => x.to_lowercase() == y.to_lowercase(),
        _ => a == b,
    }
}

pub(crate) fn numeric_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    coerce_number(a)?.partial_cmp(&coerce_number(b)?)
}

pub(crate) fn date_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    Some(to_date(a)?.cmp(&to_date(b)?))
}

/// Ordering used by `lt`/`lte`/`gt`/`gte`: numeric when both sides coerce,
/// then dates, then plain strings.
pub(crate) fn order_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    if let Some(ord) = numeric_cmp(a, b) {
        return Some(ord);
    }
    if let Some(ord) = date_cmp(a, b) {
        return Some(ord);
    }
    match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Last-resort ordering between same-kind scalars.
pub(crate) fn native_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Date(x), Value::Date(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// String view used by text operators; numbers and booleans coerce.
pub(crate) fn text_of(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_finite() => Some(v.to_display_string()),
        Value::Bool(_) => Some(v.to_display_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercion_wins_over_strings() {
        assert_eq!(order_cmp(&Value::from("10"), &Value::from("9")), Some(Ordering::Greater));
        assert_eq!(order_cmp(&Value::from("b"), &Value::from("a")), Some(Ordering::Greater));
        assert_eq!(order_cmp(&Value::Number(1.0), &Value::from("x")), None);
        assert_eq!(order_cmp(&Value::Null, &Value::Number(0.0)), None);
    }

    #[test]
    fn date_strings_compare_as_instants() {
        let a = Value::from("2024-01-01T00:00:00+02:00");
        let b = Value::from("2023-12-31T23:00:00Z");
        assert_eq!(order_cmp(&a, &b), Some(Ordering::Less));
    }

    #[test]
    fn insensitive_equality_only_folds_strings() {
        assert!(values_equal(&Value::from("AbC"), &Value::from("abc"), CaseMode::Insensitive));
        assert!(!values_equal(&Value::from("AbC"), &Value::from("abc"), CaseMode::Sensitive));
        assert!(values_equal(&Value::Number(1.0), &Value::Number(1.0), CaseMode::Insensitive));
    }

    #[test]
    fn text_of_coerces_scalars_only() {
        assert_eq!(text_of(&Value::Number(12.0)).as_deref(), Some("12"));
        assert_eq!(text_of(&Value::Bool(true)).as_deref(), Some("true"));
        assert_eq!(text_of(&Value::Null), None);
        assert_eq!(text_of(&Value::Array(vec![])), None);
    }
}
