//! Evaluated values and the scalar helpers the function registry builds on.
//!
//! Everything a `@function(...)` call produces, and every argument it
//! receives, is a [`Value`]. Values render to CSS text through [`Display`].

pub mod expr;
pub mod memo;
pub mod range;
pub mod unit;

use std::fmt;

use serde::Serialize;

pub use memo::{MemoCache, MemoKey};
pub use unit::{Scalar, Unit};

/// The result of evaluating an argument or a function call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A bare number such as `10` or `0.5`.
    Number(f64),
    /// Any other text, including dimensions like `10px`.
    Text(String),
    /// Predicate results.
    Bool(bool),
}

impl Value {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Truthiness used by conditional blocks.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
        }
    }

    /// Best-effort numeric view: numbers as-is, numeric-looking text parsed,
    /// booleans as `1`/`0`. Dimensions (`10px`) are not numbers here.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Text(s) => unit::parse_number(s),
        }
    }

    /// Numeric view that ignores a trailing unit (`10px` → `10`).
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Text(s) => Scalar::parse(s),
            other => other.as_number().map(Scalar::number),
        }
    }

    /// The unit suffix of a dimension value, if any.
    pub fn unit(&self) -> Option<Unit> {
        match self {
            Value::Text(s) => Scalar::parse(s).and_then(|scalar| scalar.unit),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Format a number the way it should appear in generated CSS.
///
/// Integral values print without a fraction and `-0` prints as `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n == f64::INFINITY {
        "Infinity".to_owned()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_owned()
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        format!("{n}")
    }
}

/// Join values with `sep`, used for memo keys and flattened argument lists.
pub fn join_values(values: &[Value], sep: &str) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}
