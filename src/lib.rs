//! # jsog
//!
//! A mutable JSON object graph with compiled path-expression navigation.
//!
//! [`Jsog`] is a dynamically-typed document node: null, scalar, array, or
//! object, mutated in place through a shared handle. Navigation with
//! [`Jsog::get`] auto-vivifies missing branches, so deeply nested writes
//! need no shape declarations. [`JsogPath`] compiles a dot/bracket
//! expression once and evaluates it against any tree.
//!
//! ```
//! use jsog::{Jsog, JsogPath};
//!
//! // Parse the lenient dialect: comments, single quotes, bare keys.
//! let tree = Jsog::parse("{greeting: 'hello', // banner
//!                          count: 1}").unwrap();
//!
//! // Navigate and mutate in place.
//! tree.get("count").unwrap().set(2);
//! tree.get("nested").unwrap().get("flag").unwrap().set(true);
//!
//! // Compile a path once, evaluate anywhere.
//! let path = JsogPath::compile("$.nested.flag").unwrap();
//! assert_eq!(path.evaluate(&tree).unwrap().bool_value().unwrap(), Some(true));
//!
//! // Canonical JSON out.
//! assert_eq!(
//!     tree.to_string(),
//!     r#"{"greeting":"hello","count":2,"nested":{"flag":true}}"#
//! );
//! ```
//!
//! # Modules
//!
//! - [`document`] — the tree node, lenient parser, canonical writer,
//!   fail-fast iterators, serde interop
//! - [`path`] — the path-expression compiler and evaluator
//! - [`binding`] — declarative parameter-to-path binding tables

pub mod binding;
pub mod document;
pub mod path;

pub use document::{Elements, Entries, Jsog, JsogError, ObjectEntry, Primitive, Value};
pub use path::{JsogPath, JsogPathError};
