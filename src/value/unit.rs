//! Numeric literals and CSS unit suffixes.
//!
//! A logos lexer classifies a piece of argument text as a bare number or a
//! dimension (number followed by a unit). Logos prefers the longest match, so
//! `10px` lexes as one [`NumericToken::Dimension`] rather than a number
//! followed by garbage, and `1em` is not mistaken for an exponent.

use std::fmt;

use logos::Logos;

/// Token produced when classifying numeric argument text.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum NumericToken {
    /// Number with a unit suffix: `10px`, `50%`, `300ms`.
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?(%|cm|fr|rem|em|ex|in|mm|pc|pt|px|vh|vw|vmax|vmin|deg|ms|s)")]
    Dimension,

    /// Plain number, optionally signed, fractional or with an exponent.
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Number,
}

/// A unit suffix that `rand` and friends carry through arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Percent,
    Cm,
    Fr,
    Rem,
    Em,
    Ex,
    In,
    Mm,
    Pc,
    Pt,
    Px,
    Vh,
    Vw,
    Vmax,
    Vmin,
    Deg,
    Ms,
    S,
}

impl Unit {
    /// Longest suffixes first so `ms` wins over `s` and `rem` over `em`.
    const BY_SUFFIX: [Unit; 18] = [
        Unit::Vmax,
        Unit::Vmin,
        Unit::Rem,
        Unit::Deg,
        Unit::Cm,
        Unit::Fr,
        Unit::Em,
        Unit::Ex,
        Unit::In,
        Unit::Mm,
        Unit::Pc,
        Unit::Pt,
        Unit::Px,
        Unit::Vh,
        Unit::Vw,
        Unit::Ms,
        Unit::Percent,
        Unit::S,
    ];

    /// The CSS spelling of this unit.
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Percent => "%",
            Unit::Cm => "cm",
            Unit::Fr => "fr",
            Unit::Rem => "rem",
            Unit::Em => "em",
            Unit::Ex => "ex",
            Unit::In => "in",
            Unit::Mm => "mm",
            Unit::Pc => "pc",
            Unit::Pt => "pt",
            Unit::Px => "px",
            Unit::Vh => "vh",
            Unit::Vw => "vw",
            Unit::Vmax => "vmax",
            Unit::Vmin => "vmin",
            Unit::Deg => "deg",
            Unit::Ms => "ms",
            Unit::S => "s",
        }
    }

    /// Split a dimension string into its numeric text and unit.
    fn split(s: &str) -> Option<(&str, Unit)> {
        Self::BY_SUFFIX
            .iter()
            .find_map(|unit| s.strip_suffix(unit.as_str()).map(|num| (num, *unit)))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A number with an optional unit, e.g. `10`, `10px`, `50%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar {
    pub value: f64,
    pub unit: Option<Unit>,
}

impl Scalar {
    /// A unitless scalar.
    pub fn number(value: f64) -> Self {
        Self { value, unit: None }
    }

    /// A scalar carrying `unit`.
    pub fn with_unit(value: f64, unit: Unit) -> Self {
        Self {
            value,
            unit: Some(unit),
        }
    }

    /// Parse text that is exactly one number or dimension (surrounding
    /// whitespace ignored).
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let (token, literal) = classify(trimmed)?;
        match token {
            NumericToken::Number => literal.parse().ok().map(Scalar::number),
            NumericToken::Dimension => {
                let (num, unit) = Unit::split(literal)?;
                num.parse().ok().map(|value| Scalar::with_unit(value, unit))
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::format_number(self.value))?;
        match self.unit {
            Some(unit) => write!(f, "{unit}"),
            None => Ok(()),
        }
    }
}

/// Lex `text` and return its token if the whole string is a single numeric
/// token.
fn classify(text: &str) -> Option<(NumericToken, &str)> {
    let mut lexer = NumericToken::lexer(text);
    let token = lexer.next()?.ok()?;
    if lexer.span() != (0..text.len()) || lexer.next().is_some() {
        return None;
    }
    Some((token, text))
}

/// Parse text that is exactly a bare number (no unit).
pub fn parse_number(text: &str) -> Option<f64> {
    match classify(text.trim())? {
        (NumericToken::Number, literal) => literal.parse().ok(),
        (NumericToken::Dimension, _) => None,
    }
}
