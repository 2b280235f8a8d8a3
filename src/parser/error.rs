//! Syntax errors with source positions.

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("Syntax error: Bad property name.")]
    BadPropertyName,
    #[error("Syntax error: unexpected ':' in value.")]
    UnexpectedColon,
    #[error("missing keyframes name")]
    MissingKeyframesName,
    #[error("expected '{{'")]
    ExpectedBlock,
    #[error("unexpected end of input")]
    UnexpectedEnd,
}

/// A syntax error at a 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("(at line {line}, column {column}) {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format() {
        let err = ParseError::new(ParseErrorKind::BadPropertyName, 3, 7);
        assert_eq!(
            err.to_string(),
            "(at line 3, column 7) Syntax error: Bad property name."
        );
    }

    #[test]
    fn test_expected_block_escapes_brace() {
        let err = ParseError::new(ParseErrorKind::ExpectedBlock, 1, 1);
        assert_eq!(err.to_string(), "(at line 1, column 1) expected '{'");
    }
}
