//! Inclusive `between` over numbers, dates and strings.

use std::cmp::Ordering;

use crate::errors::{Outcome, Reason};
use crate::value::{Value, is_nil, is_valid_date, to_date};

use super::compare::native_cmp;

/// `min <= actual <= max`, with the type ladder deciding what "<=" means.
pub(crate) fn between(actual: &Value, range: &Value) -> Outcome {
    let Some([min, max]) = range.as_array().and_then(|r| <&[Value; 2]>::try_from(r).ok()) else {
        return Err(Reason::InvalidOperand);
    };
    if is_nil(actual) || is_nil(min) || is_nil(max) {
        return Err(Reason::Nil);
    }

    if let (Value::Number(a), Value::Number(lo), Value::Number(hi)) = (actual, min, max) {
        if a.is_nan() || lo.is_nan() || hi.is_nan() {
            return Err(Reason::NotANumber);
        }
        return Ok(lo <= a && a <= hi);
    }

    let trio = [actual, min, max];
    let numbers = trio.iter().any(|v| matches!(v, Value::Number(_)));
    let strings = trio.iter().any(|v| matches!(v, Value::String(_)));
    if numbers && strings {
        return Err(Reason::TypeMismatch);
    }

    if let (Some(a), Some(lo), Some(hi)) = (to_date(actual), to_date(min), to_date(max)) {
        return Ok(lo <= a && a <= hi);
    }
    if matches!(actual, Value::Date(_)) || (actual.as_str().is_some() && is_valid_date(actual)) {
        return Err(Reason::InvalidDate);
    }

    if let (Value::String(lo), Value::String(hi)) = (min, max) {
        if !is_valid_date(min) || !is_valid_date(max) {
            return Err(Reason::InvalidDate);
        }
        if let Value::String(a) = actual {
            return Ok(lo <= a && a <= hi);
        }
        return Err(Reason::TypeMismatch);
    }

    match (native_cmp(min, actual), native_cmp(actual, max)) {
        (Some(low), Some(high)) => Ok(low != Ordering::Greater && high != Ordering::Greater),
        _ => Err(Reason::TypeMismatch),
    }
}
