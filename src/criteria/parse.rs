use crate::errors::{QueryError, Reason};
use crate::value::{Record, Value};

use super::ops::Operator;
use super::types::{
    ArrayOp, CaseMode, ElementTest, LeafOp, Node, OrderOp, Pattern, Predicate, Quantifier, TextOp,
};

/// Patterns longer than this are rejected instead of compiled.
#[cfg(feature = "regex")]
pub(crate) const MAX_PATTERN_LEN: usize = 512;

/// Builds the typed tree for a criteria value, once, ahead of evaluation.
pub(crate) struct Compiler {
    pub(crate) max_depth: Option<usize>,
}

impl Compiler {
    /// Compile a criteria node. Non-record criteria compile to a node that never matches.
    pub(crate) fn compile(&self, criteria: &Value) -> Result<Node, QueryError> {
        match criteria {
            Value::Record(map) => self.record(map, 1),
            other => {
                log::debug!("criteria must be a record, got {}", other.type_name());
                Ok(Node::rejecting(Reason::InvalidOperand))
            }
        }
    }

    fn record(&self, map: &Record, depth: usize) -> Result<Node, QueryError> {
        if let Some(limit) = self.max_depth
            && depth > limit
        {
            return Err(QueryError::DepthExceeded { limit });
        }
        let case = map.get(Operator::Mode.as_str()).map(CaseMode::from_operand).unwrap_or_default();
        let mut predicates = Vec::with_capacity(map.len());
        for (key, operand) in map {
            match Operator::from_key(key) {
                Some(op) if op.is_modifier() => {}
                Some(op) => {
                    if let Some(p) = self.operator(op, operand, case, depth)? {
                        predicates.push(p);
                    }
                }
                None => {
                    let node = self.field(operand, depth + 1)?;
                    predicates.push(Predicate::Field { name: key.clone(), node });
                }
            }
        }
        Ok(Node { predicates })
    }

    /// Field sub-criteria; a bare value is shorthand for `equals`.
    fn field(&self, operand: &Value, depth: usize) -> Result<Node, QueryError> {
        match operand {
            Value::Record(map) => self.record(map, depth),
            Value::Undefined => Ok(Node::default()),
            other => Ok(equals_node(other.clone())),
        }
    }

    fn operator(
        &self,
        op: Operator,
        operand: &Value,
        case: CaseMode,
        depth: usize,
    ) -> Result<Option<Predicate>, QueryError> {
        let leaf = |op: LeafOp| -> Result<Option<Predicate>, QueryError> {
            Ok(Some(Predicate::Leaf { op, case }))
        };
        let text = |op: TextOp, negated: bool| {
            leaf(LeafOp::Text { op, operand: operand.clone(), negated })
        };
        match op {
            Operator::Mode | Operator::Distinct => Ok(None),
            Operator::Equals => leaf(LeafOp::Equals(operand.clone())),
            Operator::Not => match operand {
                Value::Record(map) if is_operator_record(map) => {
                    leaf(LeafOp::NotMatching(Box::new(self.record(map, depth + 1)?)))
                }
                other => leaf(LeafOp::NotEquals(other.clone())),
            },
            Operator::In => leaf(LeafOp::In(operand.clone())),
            Operator::NotIn => leaf(LeafOp::NotIn(operand.clone())),
            Operator::Lt => leaf(LeafOp::Order(OrderOp::Lt, operand.clone())),
            Operator::Lte => leaf(LeafOp::Order(OrderOp::Lte, operand.clone())),
            Operator::Gt => leaf(LeafOp::Order(OrderOp::Gt, operand.clone())),
            Operator::Gte => leaf(LeafOp::Order(OrderOp::Gte, operand.clone())),
            Operator::Contains => text(TextOp::Contains, false),
            Operator::NotContains => text(TextOp::Contains, true),
            Operator::StartsWith => text(TextOp::StartsWith, false),
            Operator::NotStartsWith => text(TextOp::StartsWith, true),
            Operator::EndsWith => text(TextOp::EndsWith, false),
            Operator::NotEndsWith => text(TextOp::EndsWith, true),
            Operator::Before => leaf(LeafOp::Before(operand.clone())),
            Operator::After => leaf(LeafOp::After(operand.clone())),
            Operator::Between => leaf(LeafOp::Between(operand.clone())),
            Operator::Regex => leaf(LeafOp::Regex(compile_pattern(operand, case))),
            Operator::Has => leaf(LeafOp::Array(ArrayOp::Has, operand.clone())),
            Operator::HasEvery => leaf(LeafOp::Array(ArrayOp::HasEvery, operand.clone())),
            Operator::HasSome => leaf(LeafOp::Array(ArrayOp::HasSome, operand.clone())),
            Operator::Length => match operand {
                Value::Record(map) => leaf(LeafOp::LengthMatches(Box::new(self.record(map, depth + 1)?))),
                other => leaf(LeafOp::LengthEquals(other.clone())),
            },
            Operator::IsNull => leaf(LeafOp::IsNull(operand.clone())),
            Operator::Some => self.quantified(Quantifier::Some, operand, depth),
            Operator::Every => self.quantified(Quantifier::Every, operand, depth),
            Operator::None => self.quantified(Quantifier::None, operand, depth),
            Operator::And => Ok(Some(Predicate::And(self.group(op, operand, depth)?))),
            Operator::Or => Ok(Some(Predicate::Or(self.group(op, operand, depth)?))),
            Operator::NotGroup => Ok(Some(Predicate::Not(self.group(op, operand, depth)?))),
        }
    }

    fn quantified(
        &self,
        mode: Quantifier,
        operand: &Value,
        depth: usize,
    ) -> Result<Option<Predicate>, QueryError> {
        let node = self.field(operand, depth + 1)?;
        Ok(Some(Predicate::Quantified { mode, test: ElementTest::Criteria(node) }))
    }

    /// Logical group members: an array of nodes, or a single node.
    fn group(&self, op: Operator, operand: &Value, depth: usize) -> Result<Vec<Node>, QueryError> {
        match operand {
            Value::Array(items) => items.iter().map(|item| self.member(op, item, depth)).collect(),
            Value::Record(map) => Ok(vec![self.record(map, depth + 1)?]),
            Value::Undefined => Ok(Vec::new()),
            other => Ok(vec![self.member(op, other, depth)?]),
        }
    }

    fn member(&self, op: Operator, item: &Value, depth: usize) -> Result<Node, QueryError> {
        match item {
            Value::Record(map) => self.record(map, depth + 1),
            other => {
                log::warn!("{op} member must be a record, got {}; it will never match", other.type_name());
                Ok(Node::rejecting(Reason::InvalidOperand))
            }
        }
    }
}

fn equals_node(v: Value) -> Node {
    Node { predicates: vec![Predicate::Leaf { op: LeafOp::Equals(v), case: CaseMode::Sensitive }] }
}

/// `not: { contains: "x" }` negates a node; `not: { a: 1 }` is a plain value.
fn is_operator_record(map: &Record) -> bool {
    !map.is_empty() && map.keys().all(|k| Operator::from_key(k).is_some())
}

#[cfg(feature = "regex")]
fn compile_pattern(operand: &Value, case: CaseMode) -> Pattern {
    let Some(src) = operand.as_str() else {
        return Pattern::Invalid(Reason::InvalidOperand);
    };
    if src.len() > MAX_PATTERN_LEN {
        log::warn!("regex pattern too long: {} bytes", src.len());
        return Pattern::Invalid(Reason::InvalidPattern);
    }
    let mut builder = regex::RegexBuilder::new(src);
    builder.case_insensitive(case == CaseMode::Insensitive);
    match builder.build() {
        Ok(re) => Pattern::Compiled(re),
        Err(e) => {
            log::debug!("invalid regex {src:?}: {e}");
            Pattern::Invalid(Reason::InvalidPattern)
        }
    }
}

#[cfg(not(feature = "regex"))]
fn compile_pattern(_operand: &Value, _case: CaseMode) -> Pattern {
    log::warn!("regex operator used but the `regex` feature is disabled");
    Pattern::Invalid(Reason::Unsupported)
}
