//! One evaluator per leaf operator. All of them are total: bad input is a
//! `Reason`, never a panic.

use std::cmp::Ordering;

use crate::errors::{Outcome, Reason};
use crate::value::{Value, is_nil, to_date};

use super::compare::{order_cmp, text_of, values_equal};
use super::eval::eval_node;
use super::range::between;
use super::types::{ArrayOp, CaseMode, LeafOp, OrderOp, Pattern, TextOp};

pub(crate) fn eval_leaf(op: &LeafOp, case: CaseMode, actual: &Value) -> Outcome {
    match op {
        LeafOp::Equals(expected) => Ok(values_equal(actual, expected, case)),
        LeafOp::NotEquals(expected) => Ok(!values_equal(actual, expected, case)),
        LeafOp::NotMatching(node) => Ok(!matches!(eval_node(node, actual), Ok(true))),
        LeafOp::In(list) => {
            let items = list.as_array().ok_or(Reason::InvalidOperand)?;
            Ok(items.iter().any(|v| values_equal(actual, v, case)))
        }
        LeafOp::NotIn(list) => {
            let items = list.as_array().ok_or(Reason::InvalidOperand)?;
            Ok(!items.iter().any(|v| values_equal(actual, v, case)))
        }
        LeafOp::Order(op, operand) => ordered(*op, actual, operand),
        LeafOp::Text { op, operand, negated } => {
            text(*op, actual, operand, case).map(|hit| hit != *negated)
        }
        LeafOp::Before(operand) => dated(actual, operand).map(|ord| ord == Ordering::Less),
        LeafOp::After(operand) => dated(actual, operand).map(|ord| ord == Ordering::Greater),
        LeafOp::Between(range) => between(actual, range),
        LeafOp::Regex(pattern) => regex(pattern, actual),
        LeafOp::Array(op, operand) => array(*op, actual, operand, case),
        LeafOp::LengthEquals(expected) => {
            let n = expected.as_f64().ok_or(Reason::InvalidOperand)?;
            #[allow(clippy::cast_precision_loss)]
            let len = length_of(actual)? as f64;
            Ok(len == n)
        }
        LeafOp::LengthMatches(node) => eval_node(node, &Value::from(length_of(actual)?)),
        LeafOp::IsNull(flag) => {
            let want = flag.as_bool().ok_or(Reason::InvalidOperand)?;
            Ok(is_nil(actual) == want)
        }
    }
}

fn ordered(op: OrderOp, actual: &Value, operand: &Value) -> Outcome {
    if is_nil(actual) || is_nil(operand) {
        return Err(Reason::Nil);
    }
    let ord = order_cmp(actual, operand).ok_or(Reason::TypeMismatch)?;
    Ok(match op {
        OrderOp::Lt => ord == Ordering::Less,
        OrderOp::Lte => ord != Ordering::Greater,
        OrderOp::Gt => ord == Ordering::Greater,
        OrderOp::Gte => ord != Ordering::Less,
    })
}

fn text(op: TextOp, actual: &Value, operand: &Value, case: CaseMode) -> Outcome {
    if is_nil(actual) {
        return Err(Reason::Nil);
    }
    let hay = text_of(actual).ok_or(Reason::TypeMismatch)?;
    let needle = text_of(operand).ok_or(Reason::InvalidOperand)?;
    let (hay, needle) = match case {
        CaseMode::Insensitive => (hay.to_lowercase(), needle.to_lowercase()),
        CaseMode::Sensitive => (hay, needle),
    };
    Ok(match op {
        TextOp::Contains => hay.contains(&needle),
        TextOp::StartsWith => hay.starts_with(&needle),
        TextOp::EndsWith => hay.ends_with(&needle),
    })
}

fn dated(actual: &Value, operand: &Value) -> Result<Ordering, Reason> {
    if is_nil(actual) || is_nil(operand) {
        return Err(Reason::Nil);
    }
    let a = to_date(actual).ok_or(Reason::InvalidDate)?;
    let b = to_date(operand).ok_or(Reason::InvalidDate)?;
    Ok(a.cmp(&b))
}

#[cfg_attr(not(feature = "regex"), allow(unused_variables))]
fn regex(pattern: &Pattern, actual: &Value) -> Outcome {
    match pattern {
        #[cfg(feature = "regex")]
        Pattern::Compiled(re) => {
            if is_nil(actual) {
                return Err(Reason::Nil);
            }
            let hay = text_of(actual).ok_or(Reason::TypeMismatch)?;
            Ok(re.is_match(&hay))
        }
        Pattern::Invalid(reason) => Err(*reason),
    }
}

fn array(op: ArrayOp, actual: &Value, operand: &Value, case: CaseMode) -> Outcome {
    let items = actual.as_array().ok_or(Reason::NotAnArray)?;
    let contains = |needle: &Value| items.iter().any(|el| values_equal(el, needle, case));
    match op {
        ArrayOp::Has => Ok(contains(operand)),
        ArrayOp::HasEvery => {
            let wanted = operand.as_array().ok_or(Reason::InvalidOperand)?;
            Ok(wanted.iter().all(contains))
        }
        ArrayOp::HasSome => {
            let wanted = operand.as_array().ok_or(Reason::InvalidOperand)?;
            Ok(wanted.iter().any(contains))
        }
    }
}

/// Array length or string length in characters.
fn length_of(v: &Value) -> Result<usize, Reason> {
    match v {
        Value::Array(items) => Ok(items.len()),
        Value::String(s) => Ok(s.chars().count()),
        _ if is_nil(v) => Err(Reason::Nil),
        _ => Err(Reason::TypeMismatch),
    }
}
