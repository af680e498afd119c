//! Compiled path expressions.

use std::fmt;

use super::error::JsogPathError;
use super::{evaluator, parser};
use crate::document::{Jsog, JsogError};

/// One link in a compiled path: the terminal root marker, or a key/index
/// step carrying the rest of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// The root marker (`$`): terminal, evaluates to the input node.
    Root,
    /// Object navigation (`.key` or `['key']`).
    Key { key: String, next: Box<Segment> },
    /// Array navigation (`[0]`).
    Index { index: usize, next: Box<Segment> },
}

/// A compiled path expression.
///
/// Immutable once compiled and safe to share across threads; a single
/// compiled path may be evaluated repeatedly against any number of trees.
///
/// ```
/// use jsog::{Jsog, JsogPath};
///
/// let path = JsogPath::compile("$.servers[0].port").unwrap();
/// let tree = Jsog::parse(r#"{"servers":[{"port":443}]}"#).unwrap();
/// assert_eq!(path.evaluate(&tree).unwrap().i64_value().unwrap(), Some(443));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsogPath {
    pub(crate) head: Segment,
}

impl JsogPath {
    /// Compiles a path expression.
    pub fn compile(path: &str) -> Result<JsogPath, JsogPathError> {
        parser::compile(path)
    }

    /// Compiles and evaluates in one call.
    ///
    /// Call sites evaluating the same expression repeatedly should compile
    /// once with [`JsogPath::compile`] and reuse the result.
    pub fn query(path: &str, node: &Jsog) -> Result<Jsog, JsogError> {
        Ok(JsogPath::compile(path)?.evaluate(node)?)
    }

    /// Walks the segment chain against `node`.
    ///
    /// Key segments navigate with [`Jsog::get`], auto-vivifying missing
    /// branches; index segments navigate with [`Jsog::at`], which fails on
    /// non-arrays and out-of-bounds indices.
    pub fn evaluate(&self, node: &Jsog) -> Result<Jsog, JsogError> {
        evaluator::evaluate(&self.head, node)
    }
}

/// Escapes a key for use inside a bracketed, quoted path segment.
pub fn escape(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out
}

/// Renders the canonical bracket form: `$["key"][0]`.
///
/// Dot-form input renders in bracket form, so the round trip is not
/// literal, but the rendered expression re-parses to an equivalent path.
impl fmt::Display for JsogPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        let mut segment = &self.head;
        loop {
            match segment {
                Segment::Root => return Ok(()),
                Segment::Key { key, next } => {
                    write!(f, "[\"{}\"]", escape(key))?;
                    segment = next.as_ref();
                }
                Segment::Index { index, next } => {
                    write!(f, "[{index}]")?;
                    segment = next.as_ref();
                }
            }
        }
    }
}
