use std::fmt;
use std::sync::Arc;

use crate::errors::Reason;
use crate::value::Value;

/// Whether string operators fold case before comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseMode {
    pub(crate) fn from_operand(v: &Value) -> Self {
        match v.as_str() {
            Some(s) if s.eq_ignore_ascii_case("insensitive") => Self::Insensitive,
            _ => Self::Sensitive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Some,
    Every,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOp {
    Lt,
    Lte,
    Gt,
    Gte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOp {
    Contains,
    StartsWith,
    EndsWith,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayOp {
    Has,
    HasEvery,
    HasSome,
}

/// Pattern compiled once while the criteria is built.
#[derive(Debug, Clone)]
pub enum Pattern {
    #[cfg(feature = "regex")]
    Compiled(regex::Regex),
    Invalid(Reason),
}

/// A leaf operator bound to its operand.
#[derive(Debug, Clone)]
pub enum LeafOp {
    Equals(Value),
    NotEquals(Value),
    /// `not` with a criteria operand.
    NotMatching(Box<Node>),
    In(Value),
    NotIn(Value),
    Order(OrderOp, Value),
    Text { op: TextOp, operand: Value, negated: bool },
    Before(Value),
    After(Value),
    Between(Value),
    Regex(Pattern),
    Array(ArrayOp, Value),
    LengthEquals(Value),
    LengthMatches(Box<Node>),
    IsNull(Value),
}

/// Caller-supplied element predicate for quantifiers.
#[derive(Clone)]
pub struct ElementFn(pub(crate) Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl fmt::Debug for ElementFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ElementFn(..)")
    }
}

/// What a quantifier applies to each array element.
#[derive(Debug, Clone)]
pub enum ElementTest {
    Criteria(Node),
    Predicate(ElementFn),
}

impl ElementTest {
    /// A caller predicate, usable where a criteria node is not expressive enough.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(ElementFn(Arc::new(f)))
    }
}

#[derive(Debug, Clone)]
pub enum Predicate {
    Leaf { op: LeafOp, case: CaseMode },
    Field { name: String, node: Node },
    And(Vec<Node>),
    Or(Vec<Node>),
    Not(Vec<Node>),
    Quantified { mode: Quantifier, test: ElementTest },
    /// Malformed input that must never match.
    Reject(Reason),
}

/// A compiled criteria node: its predicates combine with implicit AND.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) predicates: Vec<Predicate>,
}

impl Node {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub(crate) fn rejecting(reason: Reason) -> Self {
        Self { predicates: vec![Predicate::Reject(reason)] }
    }
}
