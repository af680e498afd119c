//! Declarative argument binding.
//!
//! Maps named parameters onto path expressions evaluated against an input
//! tree: each parameter declares a path, a requested scalar kind, and
//! whether it is required. The table is built once at registration time —
//! path expressions compile eagerly, so malformed paths surface where the
//! binding is declared, not on first use — and then applied per call.
//!
//! # Example
//!
//! ```
//! use jsog::binding::{BindKind, BindingTable};
//! use jsog::{Jsog, Primitive, Value};
//!
//! let table = BindingTable::new()
//!     .param("name", "$.user.name", BindKind::String, true)
//!     .unwrap()
//!     .param("retries", "$.opts.retries", BindKind::I32, false)
//!     .unwrap();
//!
//! let input = Jsog::parse(r#"{"user":{"name":"ada"}}"#).unwrap();
//! let args = table.apply(&input).unwrap();
//! assert_eq!(args[0], Value::Primitive(Primitive::String("ada".into())));
//! assert_eq!(args[1], Value::Primitive(Primitive::Null));
//! ```

use std::fmt;

use crate::document::{Jsog, JsogError, Primitive, Value};
use crate::path::{JsogPath, JsogPathError};

/// The scalar kind a bound parameter converts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindKind {
    /// The addressed node itself, unconverted.
    Node,
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    BigInt,
    BigDecimal,
}

/// One declared parameter.
#[derive(Debug)]
struct Param {
    name: String,
    path: JsogPath,
    kind: BindKind,
    required: bool,
}

/// A table of parameter bindings, applied against one input tree per call.
#[derive(Debug, Default)]
pub struct BindingTable {
    params: Vec<Param>,
}

/// Errors raised while declaring or applying a binding table.
#[derive(Debug, Clone, PartialEq)]
pub enum BindError {
    /// A parameter's path expression failed to compile at registration.
    Path { name: String, source: JsogPathError },
    /// A required parameter's path evaluated to a null node.
    Missing { name: String, path: String },
    /// Evaluation or conversion failed.
    Document { name: String, source: JsogError },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::Path { name, source } => {
                write!(f, "parameter '{name}': {source}")
            }
            BindError::Missing { name, path } => {
                write!(f, "parameter '{name}' ({path}) is required")
            }
            BindError::Document { name, source } => {
                write!(f, "parameter '{name}': {source}")
            }
        }
    }
}

impl std::error::Error for BindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BindError::Path { source, .. } => Some(source),
            BindError::Document { source, .. } => Some(source),
            BindError::Missing { .. } => None,
        }
    }
}

impl BindingTable {
    /// Creates an empty table.
    pub fn new() -> BindingTable {
        BindingTable::default()
    }

    /// Declares a parameter, compiling its path expression eagerly.
    pub fn param(
        mut self,
        name: impl Into<String>,
        path: &str,
        kind: BindKind,
        required: bool,
    ) -> Result<BindingTable, BindError> {
        let name = name.into();
        let path = JsogPath::compile(path).map_err(|source| BindError::Path {
            name: name.clone(),
            source,
        })?;
        self.params.push(Param {
            name,
            path,
            kind,
            required,
        });
        Ok(self)
    }

    /// The number of declared parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Evaluates every parameter's path against `input` and converts the
    /// results, in declaration order.
    ///
    /// A required parameter whose path lands on a null node fails with
    /// [`BindError::Missing`]; optional parameters yield a raw null.
    /// Conversion failures (a non-numeric string bound as an integer, a
    /// container bound as a scalar) propagate as [`BindError::Document`].
    pub fn apply(&self, input: &Jsog) -> Result<Vec<Value>, BindError> {
        let mut args = Vec::with_capacity(self.params.len());
        for param in &self.params {
            let node = param
                .path
                .evaluate(input)
                .map_err(|source| BindError::Document {
                    name: param.name.clone(),
                    source,
                })?;
            if param.required && node.is_null() {
                return Err(BindError::Missing {
                    name: param.name.clone(),
                    path: param.path.to_string(),
                });
            }
            let value = convert(&node, param.kind).map_err(|source| BindError::Document {
                name: param.name.clone(),
                source,
            })?;
            args.push(value);
        }
        Ok(args)
    }
}

fn convert(node: &Jsog, kind: BindKind) -> Result<Value, JsogError> {
    fn primitive<T>(value: Option<T>, make: impl FnOnce(T) -> Primitive) -> Value {
        Value::Primitive(value.map_or(Primitive::Null, make))
    }

    Ok(match kind {
        BindKind::Node => Value::Node(node.clone()),
        BindKind::String => primitive(node.string_value()?, Primitive::String),
        BindKind::Bool => primitive(node.bool_value()?, Primitive::Bool),
        BindKind::I8 => primitive(node.i8_value()?, |v| Primitive::Int(i64::from(v))),
        BindKind::I16 => primitive(node.i16_value()?, |v| Primitive::Int(i64::from(v))),
        BindKind::I32 => primitive(node.i32_value()?, |v| Primitive::Int(i64::from(v))),
        BindKind::I64 => primitive(node.i64_value()?, Primitive::Int),
        BindKind::F32 => primitive(node.f32_value()?, |v| Primitive::Float(f64::from(v))),
        BindKind::F64 => primitive(node.f64_value()?, Primitive::Float),
        BindKind::BigInt => primitive(node.bigint_value()?, Primitive::BigInt),
        BindKind::BigDecimal => primitive(node.bigdecimal_value()?, Primitive::BigDecimal),
    })
}
