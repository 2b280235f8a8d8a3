//! Crate-level error type.

use std::path::PathBuf;

use crate::parser::ParseError;

/// Errors from compiling a doodle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseErrorKind;

    #[test]
    fn test_parse_error_is_transparent() {
        let err: Error = ParseError::new(ParseErrorKind::UnexpectedColon, 2, 4).into();
        assert_eq!(
            err.to_string(),
            "(at line 2, column 4) Syntax error: unexpected ':' in value."
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io("a.doodle", source);
        assert_eq!(err.to_string(), "failed to read a.doodle: gone");
    }
}
