//! Error types for document operations.

use std::fmt;

use super::node::Primitive;
use crate::path::JsogPathError;

/// Errors that can occur while operating on a document node.
#[derive(Debug, Clone, PartialEq)]
pub enum JsogError {
    /// An object-only operation was invoked on a node of another shape.
    NotAnObject,
    /// An array-only operation was invoked on a node of another shape.
    NotAnArray,
    /// A size query was made against a scalar node.
    NotAnArrayOrObject,
    /// A raw-value read was made against a container node.
    NotAPrimitive,
    /// An array index outside the valid range.
    IndexOutOfRange { index: usize, len: usize },
    /// An iterator detected a structural change since its creation.
    ConcurrentModification,
    /// Malformed JSON text, with a 1-based source position.
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    /// A scalar whose string form is not a valid number for the requested
    /// width.
    InvalidNumber {
        value: String,
        target: &'static str,
    },
    /// A path expression failed to compile during one-shot evaluation.
    Path(JsogPathError),
}

impl JsogError {
    pub(crate) fn invalid_number(value: &Primitive, target: &'static str) -> JsogError {
        JsogError::InvalidNumber {
            value: value.to_text().unwrap_or_default(),
            target,
        }
    }
}

impl fmt::Display for JsogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsogError::NotAnObject => write!(f, "the value is not an object"),
            JsogError::NotAnArray => write!(f, "the value is not an array"),
            JsogError::NotAnArrayOrObject => {
                write!(f, "the value is not an array or object")
            }
            JsogError::NotAPrimitive => {
                write!(f, "the value is not a primitive or node")
            }
            JsogError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            JsogError::ConcurrentModification => {
                write!(f, "structure was modified during iteration")
            }
            JsogError::Parse {
                line,
                column,
                message,
            } => {
                write!(f, "parse error at line {line}, column {column}: {message}")
            }
            JsogError::InvalidNumber { value, target } => {
                write!(f, "invalid number '{value}' for {target}")
            }
            JsogError::Path(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for JsogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JsogError::Path(err) => Some(err),
            _ => None,
        }
    }
}

impl From<JsogPathError> for JsogError {
    fn from(err: JsogPathError) -> Self {
        JsogError::Path(err)
    }
}
