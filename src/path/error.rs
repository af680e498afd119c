//! Error types for path-expression compilation.

use std::fmt;

/// Errors that can occur while compiling a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsogPathError {
    /// The expression was empty.
    Empty,
    /// The expression did not begin with `$`.
    MustBeginWithRoot,
    /// Unexpected character at a specific position.
    UnexpectedToken {
        position: usize,
        found: char,
        expected: &'static str,
    },
    /// The expression ended where more input was required.
    UnexpectedEnd {
        position: usize,
        expected: &'static str,
    },
    /// A bracketed key was not quoted.
    MustBeQuoted { position: usize },
    /// An unknown escape character.
    InvalidEscape { position: usize, found: char },
    /// A bracketed index that does not fit an index type.
    InvalidIndex { position: usize },
}

impl fmt::Display for JsogPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsogPathError::Empty => write!(f, "path expressions may not be empty"),
            JsogPathError::MustBeginWithRoot => {
                write!(f, "path expressions must begin with '$'")
            }
            JsogPathError::UnexpectedToken {
                position,
                found,
                expected,
            } => write!(
                f,
                "unexpected character '{found}' at position {position}, expected {expected}"
            ),
            JsogPathError::UnexpectedEnd { position, expected } => write!(
                f,
                "unexpected end of path at position {position}, expected {expected}"
            ),
            JsogPathError::MustBeQuoted { position } => {
                write!(f, "keys must be quoted at position {position}")
            }
            JsogPathError::InvalidEscape { position, found } => {
                write!(f, "invalid escape character '{found}' at position {position}")
            }
            JsogPathError::InvalidIndex { position } => {
                write!(f, "invalid index at position {position}")
            }
        }
    }
}

impl std::error::Error for JsogPathError {}
