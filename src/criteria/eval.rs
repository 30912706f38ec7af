use crate::errors::Outcome;
use crate::value::Value;

use super::leaf::eval_leaf;
use super::quantifier::explain_array;
use super::types::{Node, Predicate};

/// Implicit AND over a node's predicates. The first non-match decides.
pub(crate) fn eval_node(node: &Node, value: &Value) -> Outcome {
    for p in &node.predicates {
        match eval_predicate(p, value) {
            Ok(true) => {}
            other => return other,
        }
    }
    Ok(true)
}

fn eval_predicate(p: &Predicate, value: &Value) -> Outcome {
    match p {
        Predicate::Leaf { op, case } => eval_leaf(op, *case, value),
        Predicate::Field { name, node } => eval_node(node, value.get(name)),
        Predicate::And(nodes) => {
            for n in nodes {
                match eval_node(n, value) {
                    Ok(true) => {}
                    other => return other,
                }
            }
            Ok(true)
        }
        Predicate::Or(nodes) => {
            let mut first_err = None;
            for n in nodes {
                match eval_node(n, value) {
                    Ok(true) => return Ok(true),
                    Ok(false) => {}
                    Err(r) => {
                        first_err.get_or_insert(r);
                    }
                }
            }
            first_err.map_or(Ok(false), Err)
        }
        Predicate::Not(nodes) => Ok(nodes.iter().all(|n| !matches!(eval_node(n, value), Ok(true)))),
        Predicate::Quantified { mode, test } => explain_array(value, test, *mode),
        Predicate::Reject(reason) => Err(*reason),
    }
}
