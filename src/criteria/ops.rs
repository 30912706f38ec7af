//! The closed operator vocabulary of a criteria node.

use std::fmt;

/// Every key a criteria node treats as an operator. Anything else is a field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    Not,
    In,
    NotIn,
    Lt,
    Lte,
    Gt,
    Gte,
    Contains,
    NotContains,
    StartsWith,
    NotStartsWith,
    EndsWith,
    NotEndsWith,
    Before,
    After,
    Between,
    Regex,
    Has,
    HasEvery,
    HasSome,
    Length,
    IsNull,
    Some,
    Every,
    None,
    And,
    Or,
    NotGroup,
    /// Case-sensitivity modifier for string operators in the same node.
    Mode,
    /// Reserved; consumed without producing a predicate.
    Distinct,
}

impl Operator {
    #[cfg(test)]
    const ALL: [Self; 31] = [
        Self::Equals,
        Self::Not,
        Self::In,
        Self::NotIn,
        Self::Lt,
        Self::Lte,
        Self::Gt,
        Self::Gte,
        Self::Contains,
        Self::NotContains,
        Self::StartsWith,
        Self::NotStartsWith,
        Self::EndsWith,
        Self::NotEndsWith,
        Self::Before,
        Self::After,
        Self::Between,
        Self::Regex,
        Self::Has,
        Self::HasEvery,
        Self::HasSome,
        Self::Length,
        Self::IsNull,
        Self::Some,
        Self::Every,
        Self::None,
        Self::And,
        Self::Or,
        Self::NotGroup,
        Self::Mode,
        Self::Distinct,
    ];

    /// Case-sensitive lookup of an operator key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "equals" => Self::Equals,
            "not" => Self::Not,
            "in" => Self::In,
            "notIn" => Self::NotIn,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "contains" => Self::Contains,
            "notContains" => Self::NotContains,
            "startsWith" => Self::StartsWith,
            "notStartsWith" => Self::NotStartsWith,
            "endsWith" => Self::EndsWith,
            "notEndsWith" => Self::NotEndsWith,
            "before" => Self::Before,
            "after" => Self::After,
            "between" => Self::Between,
            "regex" => Self::Regex,
            "has" => Self::Has,
            "hasEvery" => Self::HasEvery,
            "hasSome" => Self::HasSome,
            "length" => Self::Length,
            "isNull" => Self::IsNull,
            "some" => Self::Some,
            "every" => Self::Every,
            "none" => Self::None,
            "AND" => Self::And,
            "OR" => Self::Or,
            "NOT" => Self::NotGroup,
            "mode" => Self::Mode,
            "distinct" => Self::Distinct,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Not => "not",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::StartsWith => "startsWith",
            Self::NotStartsWith => "notStartsWith",
            Self::EndsWith => "endsWith",
            Self::NotEndsWith => "notEndsWith",
            Self::Before => "before",
            Self::After => "after",
            Self::Between => "between",
            Self::Regex => "regex",
            Self::Has => "has",
            Self::HasEvery => "hasEvery",
            Self::HasSome => "hasSome",
            Self::Length => "length",
            Self::IsNull => "isNull",
            Self::Some => "some",
            Self::Every => "every",
            Self::None => "none",
            Self::And => "AND",
            Self::Or => "OR",
            Self::NotGroup => "NOT",
            Self::Mode => "mode",
            Self::Distinct => "distinct",
        }
    }

    /// Modifiers shape sibling operators but never match on their own.
    #[must_use]
    pub const fn is_modifier(self) -> bool {
        matches!(self, Self::Mode | Self::Distinct)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_roundtrip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_key(op.as_str()), Some(op));
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(Operator::from_key("and"), None);
        assert_eq!(Operator::from_key("Equals"), None);
        assert_eq!(Operator::from_key("NOT"), Some(Operator::NotGroup));
        assert_eq!(Operator::from_key("not"), Some(Operator::Not));
    }

    #[test]
    fn classification() {
        assert!(Operator::Mode.is_modifier());
        assert!(Operator::Distinct.is_modifier());
        assert!(!Operator::Equals.is_modifier());
        assert_eq!(Operator::HasSome.to_string(), "hasSome");
    }
}
