//! Error types shared by the Guardian front-end.
//!
//! Two kinds of failure live here:
//!
//! - [`ConstructionError`]: raised by the node [`factory`](crate::factory) when a
//!   statement is requested without one of its required children. It carries no
//!   source location; the syntax tree itself knows nothing about text.
//! - [`Error`]: the front-end error used by the lexer and parser. It holds a
//!   message and, when known, the 1-based line and column of the offending token.
//!
//! A construction error converts into an [`Error`] so that the parser can
//! propagate factory failures with `?` and attach a location afterwards.
//!
//! # Examples
//!
//! ```rust
//! use guardian_syntax::error::{Error, Result, error_at};
//!
//! fn expect_brace(found: &str, line: usize, col: usize) -> Result<()> {
//!     if found == "{" {
//!         Ok(())
//!     } else {
//!         error_at(line, col, format!("Expected '{{', found '{}'", found))
//!     }
//! }
//!
//! let err = expect_brace("(", 3, 7).unwrap_err();
//! assert_eq!(err.to_string(), "Expected '{', found '(' at 3:7");
//! ```

use thiserror::Error;

use crate::stmt::StmtKind;

/// A statement was requested from the factory without a required child.
///
/// No node is produced when this is returned; the caller decides whether to
/// abort or recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot build {kind} statement: missing {field}")]
pub struct ConstructionError {
    /// The variant that was being built.
    pub kind: StmtKind,
    /// Name of the missing field, as it appears on the node.
    pub field: &'static str,
}

impl ConstructionError {
    pub(crate) fn missing(kind: StmtKind, field: &'static str) -> Self {
        Self { kind, field }
    }
}

/// An error raised while lexing or parsing Guardian source.
///
/// The location is optional: errors that bubble up from the factory start out
/// unlocated and are pinned to a token with [`Error::located`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{msg}{}", location_suffix(.line, .col))]
pub struct Error {
    /// Human-readable error message
    pub msg: String,

    /// Optional line number in source file (1-based)
    pub line: Option<usize>,

    /// Optional column number in source file (1-based)
    pub col: Option<usize>,
}

fn location_suffix(line: &Option<usize>, col: &Option<usize>) -> String {
    match (line, col) {
        (Some(l), Some(c)) => format!(" at {}:{}", l, c),
        _ => String::new(),
    }
}

impl Error {
    /// Creates a new error with the given message and no location.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            line: None,
            col: None,
        }
    }

    /// Creates a new error with the given message and source location.
    ///
    /// ```rust
    /// use guardian_syntax::Error;
    ///
    /// let error = Error::with_span("Unexpected token 'case'", 5, 12);
    /// assert_eq!(error.to_string(), "Unexpected token 'case' at 5:12");
    /// ```
    pub fn with_span(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            msg: msg.into(),
            line: Some(line),
            col: Some(col),
        }
    }

    /// Attaches a location unless the error already has one.
    pub fn located(mut self, line: usize, col: usize) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
            self.col = Some(col);
        }
        self
    }
}

impl From<ConstructionError> for Error {
    fn from(err: ConstructionError) -> Self {
        Error::new(err.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::new(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::new(s)
    }
}

/// A specialized `Result` type for front-end operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::new(msg))`.
pub fn error<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::new(msg))
}

/// Shorthand for `Err(Error::with_span(msg, line, col))`.
pub fn error_at<T>(line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::with_span(msg, line, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_and_without_location() {
        assert_eq!(Error::new("boom").to_string(), "boom");
        assert_eq!(Error::with_span("boom", 2, 9).to_string(), "boom at 2:9");
    }

    #[test]
    fn located_keeps_the_first_location() {
        let err = Error::with_span("boom", 1, 1).located(4, 4);
        assert_eq!((err.line, err.col), (Some(1), Some(1)));

        let err = Error::new("boom").located(4, 5);
        assert_eq!((err.line, err.col), (Some(4), Some(5)));
    }

    #[test]
    fn construction_error_converts() {
        let err: Error = ConstructionError::missing(StmtKind::For, "block").into();
        assert_eq!(err.msg, "cannot build for statement: missing block");
        assert_eq!(err.line, None);
    }
}
