use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("query has no `where` clause")]
    MissingWhere,

    #[error("criteria nesting exceeds depth limit of {limit}")]
    DepthExceeded { limit: usize },
}

/// Why an operator evaluated to `false` without the value being a plain non-match.
///
/// The public evaluation surface collapses these to `false`; `explain` keeps them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    #[error("value is null or undefined")]
    Nil,

    #[error("operand and value have incompatible types")]
    TypeMismatch,

    #[error("operand has the wrong shape for this operator")]
    InvalidOperand,

    #[error("value is not a valid date")]
    InvalidDate,

    #[error("value is NaN")]
    NotANumber,

    #[error("value is not an array")]
    NotAnArray,

    #[error("invalid regular expression")]
    InvalidPattern,

    #[error("operator not available in this build")]
    Unsupported,
}

/// Result of evaluating a predicate: `Ok(matched)` or the reason it could not match.
pub type Outcome = Result<bool, Reason>;
