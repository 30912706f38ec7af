//! Criteria compilation and evaluation.
//!
//! A criteria value is compiled once into a [`Node`] tree, then evaluated against any number of
//! values. Evaluation is total: malformed criteria or mismatched operand types produce `false`.
//! [`Criteria::explain`] keeps the [`Reason`] behind a non-match for diagnostics.

mod compare;
mod eval;
mod leaf;
pub mod ops;
mod parse;
pub mod quantifier;
mod range;
pub mod types;

pub use ops::Operator;
pub use quantifier::{evaluate_array, explain_array};
pub use types::{CaseMode, ElementTest, Node, Predicate, Quantifier};

use crate::errors::{Outcome, QueryError, Reason};
use crate::value::Value;

use parse::Compiler;

/// A compiled, immutable criteria tree.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    root: Node,
}

impl Criteria {
    /// Compile without a depth limit.
    #[must_use]
    pub fn compile(criteria: &Value) -> Self {
        Self::compile_with_limit(criteria, None)
            .unwrap_or_else(|_| Self { root: Node::rejecting(Reason::InvalidOperand) })
    }

    /// Compile, failing when nesting exceeds `max_depth` records.
    pub fn compile_with_limit(criteria: &Value, max_depth: Option<usize>) -> Result<Self, QueryError> {
        let root = Compiler { max_depth }.compile(criteria)?;
        Ok(Self { root })
    }

    #[must_use]
    pub const fn from_node(root: Node) -> Self {
        Self { root }
    }

    #[must_use]
    pub const fn node(&self) -> &Node {
        &self.root
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    #[must_use]
    pub fn evaluate(&self, value: &Value) -> bool {
        self.explain(value).unwrap_or(false)
    }

    pub fn explain(&self, value: &Value) -> Outcome {
        eval::eval_node(&self.root, value)
    }
}

/// One-shot compile and evaluate.
#[must_use]
pub fn evaluate(criteria: &Value, value: &Value) -> bool {
    Criteria::compile(criteria).evaluate(value)
}

pub fn explain(criteria: &Value, value: &Value) -> Outcome {
    Criteria::compile(criteria).explain(value)
}
