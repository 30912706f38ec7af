use crate::errors::{Outcome, Reason};
use crate::value::{Value, is_nil, is_object};

use super::eval::eval_node;
use super::types::{ElementTest, Quantifier};

/// Apply `some`/`every`/`none` over an array value. Non-arrays never match.
#[must_use]
pub fn evaluate_array(value: &Value, test: &ElementTest, mode: Quantifier) -> bool {
    explain_array(value, test, mode).unwrap_or(false)
}

/// Like [`evaluate_array`], but reports why a non-match happened.
pub fn explain_array(value: &Value, test: &ElementTest, mode: Quantifier) -> Outcome {
    let Some(items) = value.as_array() else {
        return Err(Reason::NotAnArray);
    };

    // An empty sub-filter means "has a related record", not "matches anything".
    if let ElementTest::Criteria(node) = test
        && node.is_empty()
    {
        return Ok(match mode {
            Quantifier::Some => items.iter().any(is_object),
            Quantifier::Every => true,
            Quantifier::None => false,
        });
    }

    let hit = |el: &Value| !is_nil(el) && element_matches(test, el);
    Ok(match mode {
        Quantifier::Some => items.iter().any(hit),
        Quantifier::Every => items.iter().all(hit),
        Quantifier::None => !items.iter().any(hit),
    })
}

fn element_matches(test: &ElementTest, el: &Value) -> bool {
    match test {
        ElementTest::Criteria(node) => matches!(eval_node(node, el), Ok(true)),
        ElementTest::Predicate(f) => (f.0)(el),
    }
}
