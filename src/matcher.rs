//! Record matching: a field-keyed criteria map applied to one record at a time.

use std::sync::Arc;

use crate::criteria::Criteria;
use crate::errors::{Outcome, Reason};
use crate::value::Value;

/// A compiled criteria map, reusable across records.
#[derive(Debug, Clone)]
pub struct Matcher {
    criteria: Option<Arc<Criteria>>,
}

impl Matcher {
    /// Non-record criteria produce a matcher that rejects everything.
    #[must_use]
    pub fn new(criteria: &Value) -> Self {
        if criteria.as_record().is_none() {
            log::debug!("matcher criteria is {}, nothing will match", criteria.type_name());
            return Self { criteria: None };
        }
        Self { criteria: Some(Arc::new(Criteria::compile(criteria))) }
    }

    #[must_use]
    pub fn from_criteria(criteria: impl Into<Arc<Criteria>>) -> Self {
        Self { criteria: Some(criteria.into()) }
    }

    #[must_use]
    pub fn matches(&self, record: &Value) -> bool {
        self.explain(record).unwrap_or(false)
    }

    pub fn explain(&self, record: &Value) -> Outcome {
        match &self.criteria {
            Some(c) => c.explain(record),
            None => Err(Reason::InvalidOperand),
        }
    }
}

/// One-shot match. `false` when `criteria` is not a record.
#[must_use]
pub fn matches(criteria: &Value, record: &Value) -> bool {
    Matcher::new(criteria).matches(record)
}

pub fn explain(criteria: &Value, record: &Value) -> Outcome {
    Matcher::new(criteria).explain(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_record_criteria_never_match() {
        let rec = Value::from(json!({"a": 1}));
        assert!(!matches(&Value::Null, &rec));
        assert!(!matches(&Value::Undefined, &rec));
        assert!(!matches(&Value::from("a"), &rec));
        assert!(!matches(&Value::from(json!([{"a": 1}])), &rec));
        assert_eq!(explain(&Value::Null, &rec), Err(Reason::InvalidOperand));
    }

    #[test]
    fn empty_groups_at_top_level() {
        let any = Value::from(json!({"x": 1}));
        assert!(matches(&Value::from(json!({"AND": []})), &any));
        assert!(!matches(&Value::from(json!({"OR": []})), &any));
    }

    #[test]
    fn reuse_across_records() {
        let m = Matcher::new(&Value::from(json!({"age": {"gte": 18}})));
        assert!(m.matches(&Value::from(json!({"age": 20}))));
        assert!(!m.matches(&Value::from(json!({"age": 17}))));
    }
}
