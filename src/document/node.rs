//! The mutable JSON object graph node.
//!
//! This module provides the core data structure of the crate. Every JSON
//! value is a [`Jsog`]: a cheap-to-clone shared handle onto a mutable cell
//! holding null, a primitive scalar, a reference to another node, an array,
//! or an object. Container children are either raw primitives or live child
//! handles, which is what makes chained navigation (`root.get("a")?.get("b")?`)
//! write back into the original tree.
//!
//! # Example
//!
//! ```
//! use jsog::Jsog;
//!
//! let root = Jsog::object();
//! root.get("server").unwrap().get("port").unwrap().set(8080);
//!
//! assert_eq!(root.to_string(), r#"{"server":{"port":8080}}"#);
//! assert_eq!(root.path("$.server.port").unwrap().i64_value().unwrap(), Some(8080));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bigdecimal::{BigDecimal, ToPrimitive};
use indexmap::IndexMap;
use num_bigint::BigInt;

use super::error::JsogError;
use super::iter::{Elements, Entries};
use super::{parser, writer};
use crate::path::JsogPath;

/// A raw scalar value, storable directly inside a container slot.
///
/// `Null` counts as a primitive: it is the default state of every fresh
/// node, and the standalone membership test below is the same definition
/// [`Jsog::is_primitive`] uses.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    BigInt(BigInt),
    BigDecimal(BigDecimal),
    String(String),
}

impl Primitive {
    /// Returns true if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Primitive::Null)
    }

    /// The string form used by loose comparison and the string accessor.
    ///
    /// Null has no string form; every other kind renders the way it would
    /// appear unquoted (`true`, `42`, `1.5`, `hello`).
    pub fn to_text(&self) -> Option<String> {
        match self {
            Primitive::Null => None,
            Primitive::Bool(b) => Some(b.to_string()),
            Primitive::Int(i) => Some(i.to_string()),
            Primitive::Float(f) => Some(format_float(*f)),
            Primitive::BigInt(b) => Some(b.to_string()),
            Primitive::BigDecimal(d) => Some(d.to_string()),
            Primitive::String(s) => Some(s.clone()),
        }
    }
}

/// Formats a float without losing the distinction from integers: the result
/// always carries a decimal point (or an exponent already present in the
/// shortest representation).
pub(crate) fn format_float(f: f64) -> String {
    let s = f.to_string();
    if f.is_finite() && !s.contains('.') && !s.contains('e') && !s.contains('E') {
        format!("{s}.0")
    } else {
        s
    }
}

/// What container slots hold and what mutation operations accept: a raw
/// primitive or a live node handle.
///
/// Most call sites never name this type; every primitive Rust type converts
/// into it, as does [`Jsog`] itself:
///
/// ```
/// use jsog::Jsog;
///
/// let list = Jsog::array();
/// list.add(1).add("two").add(true).add(());
/// list.add(Jsog::object_of("nested", "yes"));
/// assert_eq!(list.size().unwrap(), 5);
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    Primitive(Primitive),
    Node(Jsog),
}

impl Value {
    /// Returns true if this slot holds a raw primitive (including null).
    pub fn is_primitive(&self) -> bool {
        matches!(self, Value::Primitive(_))
    }
}

/// Slot equality is strict: raw primitives compare by kind and value, node
/// handles compare by the node's loose equality, and a raw primitive never
/// equals a node. This is the membership rule for `index_of`/`contains`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Primitive(a), Value::Primitive(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! primitive_from {
    ($($ty:ty => $variant:expr),* $(,)?) => {
        $(
            impl From<$ty> for Primitive {
                fn from(value: $ty) -> Self {
                    $variant(value)
                }
            }
        )*
    };
}

primitive_from! {
    bool => Primitive::Bool,
    i64 => Primitive::Int,
    f64 => Primitive::Float,
    BigInt => Primitive::BigInt,
    BigDecimal => Primitive::BigDecimal,
    String => Primitive::String,
}

impl From<()> for Primitive {
    fn from(_: ()) -> Self {
        Primitive::Null
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.to_string())
    }
}

impl From<i8> for Primitive {
    fn from(value: i8) -> Self {
        Primitive::Int(i64::from(value))
    }
}

impl From<i16> for Primitive {
    fn from(value: i16) -> Self {
        Primitive::Int(i64::from(value))
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Primitive::Int(i64::from(value))
    }
}

impl From<u8> for Primitive {
    fn from(value: u8) -> Self {
        Primitive::Int(i64::from(value))
    }
}

impl From<u16> for Primitive {
    fn from(value: u16) -> Self {
        Primitive::Int(i64::from(value))
    }
}

impl From<u32> for Primitive {
    fn from(value: u32) -> Self {
        Primitive::Int(i64::from(value))
    }
}

impl From<u64> for Primitive {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Primitive::Int(v),
            Err(_) => Primitive::BigInt(BigInt::from(value)),
        }
    }
}

impl From<f32> for Primitive {
    fn from(value: f32) -> Self {
        Primitive::Float(f64::from(value))
    }
}

macro_rules! value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Primitive(Primitive::from(value))
                }
            }

            impl From<$ty> for Jsog {
                fn from(value: $ty) -> Self {
                    Jsog::from_primitive(Primitive::from(value))
                }
            }
        )*
    };
}

value_from! {
    bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64,
    &str, String, BigInt, BigDecimal, (),
}

impl From<Primitive> for Value {
    fn from(value: Primitive) -> Self {
        Value::Primitive(value)
    }
}

impl From<Jsog> for Value {
    fn from(node: Jsog) -> Self {
        Value::Node(node)
    }
}

impl From<&Jsog> for Value {
    fn from(node: &Jsog) -> Self {
        Value::Node(node.clone())
    }
}

impl From<Primitive> for Jsog {
    fn from(value: Primitive) -> Self {
        Jsog::from_primitive(value)
    }
}

/// The current value of a node: a scalar, a reference to another live node
/// (produced by `set` with a node argument), or a container of slots.
#[derive(Debug)]
pub(crate) enum NodeValue {
    Scalar(Primitive),
    Ref(Jsog),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

#[derive(Debug)]
pub(crate) struct Inner {
    pub(crate) value: NodeValue,
    /// Bumped on every structural mutation; captured by iterators for
    /// fail-fast invalidation.
    pub(crate) mod_count: u64,
}

/// A node in a JSON object graph.
///
/// `Jsog` is a shared handle: `clone()` aliases the same node, mutation goes
/// through `&self`, and navigation returns live handles into the tree.
/// Obtain a deep copy with [`Jsog::deep_clone`].
///
/// Nodes are not thread-safe; a compiled [`JsogPath`] is, and may be
/// evaluated repeatedly against any tree.
#[derive(Clone)]
pub struct Jsog {
    pub(crate) inner: Rc<RefCell<Inner>>,
}

impl Jsog {
    /// Creates a new null node.
    ///
    /// ```
    /// use jsog::Jsog;
    ///
    /// assert!(Jsog::new().is_null());
    /// ```
    pub fn new() -> Jsog {
        Jsog::from_node_value(NodeValue::Scalar(Primitive::Null))
    }

    /// Creates a new empty array node.
    pub fn array() -> Jsog {
        Jsog::from_node_value(NodeValue::Array(Vec::new()))
    }

    /// Creates a new array node containing the given values.
    ///
    /// ```
    /// use jsog::Jsog;
    ///
    /// let list = Jsog::array_of([1, 2, 3]);
    /// assert_eq!(list.to_string(), "[1,2,3]");
    /// ```
    pub fn array_of<I>(values: I) -> Jsog
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let list = Jsog::array();
        list.add_all(values);
        list
    }

    /// Creates a new empty object node.
    pub fn object() -> Jsog {
        Jsog::from_node_value(NodeValue::Object(IndexMap::new()))
    }

    /// Creates a new object node with a single entry.
    pub fn object_of(key: impl Into<String>, value: impl Into<Value>) -> Jsog {
        let object = Jsog::object();
        object.put(key, value);
        object
    }

    /// Parses a lenient JSON string into a tree.
    ///
    /// On top of standard JSON the dialect tolerates `//` and `/* */`
    /// comments, single-quoted strings, and unquoted field names. An empty
    /// (or all-whitespace) input yields a null node rather than an error.
    ///
    /// ```
    /// use jsog::Jsog;
    ///
    /// let tree = Jsog::parse("{name: 'ada', /* inline */ tags: [1, 2]}").unwrap();
    /// assert_eq!(tree.to_string(), r#"{"name":"ada","tags":[1,2]}"#);
    /// ```
    pub fn parse(input: &str) -> Result<Jsog, JsogError> {
        parser::parse(input)
    }

    pub(crate) fn from_primitive(value: Primitive) -> Jsog {
        Jsog::from_node_value(NodeValue::Scalar(value))
    }

    pub(crate) fn from_node_value(value: NodeValue) -> Jsog {
        Jsog {
            inner: Rc::new(RefCell::new(Inner {
                value,
                mod_count: 0,
            })),
        }
    }

    /// Wraps a container slot for navigation: node slots come back by
    /// identity, raw primitives in a fresh detached handle.
    pub(crate) fn wrap(slot: &Value) -> Jsog {
        match slot {
            Value::Node(node) => node.clone(),
            Value::Primitive(p) => Jsog::from_primitive(p.clone()),
        }
    }

    /// Returns true if the node's value is null.
    pub fn is_null(&self) -> bool {
        matches!(self.inner.borrow().value, NodeValue::Scalar(Primitive::Null))
    }

    /// Returns true if the node's value is a primitive (null included).
    pub fn is_primitive(&self) -> bool {
        matches!(self.inner.borrow().value, NodeValue::Scalar(_))
    }

    /// Returns true if the node's value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self.inner.borrow().value, NodeValue::Array(_))
    }

    /// Returns true if the node's value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self.inner.borrow().value, NodeValue::Object(_))
    }

    /// Replaces this node's value with a primitive or another live node.
    ///
    /// A node argument is stored by identity, not cloned; merge relies on
    /// this to graft subtrees without copying.
    pub fn set(&self, value: impl Into<Value>) -> &Self {
        let value = value.into();
        let mut inner = self.inner.borrow_mut();
        inner.value = match value {
            Value::Primitive(p) => NodeValue::Scalar(p),
            Value::Node(node) => NodeValue::Ref(node),
        };
        self
    }

    /// Treats this node as an array and appends the value.
    ///
    /// If the node is not currently an array its previous contents are
    /// discarded and it becomes a fresh empty array first.
    ///
    /// ```
    /// use jsog::Jsog;
    ///
    /// let node = Jsog::object_of("lost", true);
    /// node.add(1);
    /// assert_eq!(node.to_string(), "[1]");
    /// ```
    pub fn add(&self, value: impl Into<Value>) -> &Self {
        let value = value.into();
        let mut inner = self.inner.borrow_mut();
        inner.force_array().push(value);
        inner.mod_count += 1;
        self
    }

    /// Treats this node as an array and inserts the value at `index`,
    /// shifting later elements right.
    ///
    /// Coerces non-arrays the same destructive way as [`Jsog::add`]. Fails
    /// with `IndexOutOfRange` unless `index <= len`.
    pub fn insert(&self, index: usize, value: impl Into<Value>) -> Result<&Self, JsogError> {
        let value = value.into();
        let mut inner = self.inner.borrow_mut();
        let list = inner.force_array();
        if index > list.len() {
            let len = list.len();
            return Err(JsogError::IndexOutOfRange { index, len });
        }
        list.insert(index, value);
        inner.mod_count += 1;
        Ok(self)
    }

    /// Appends every value in the iterator. Not atomic: this is a plain
    /// loop over [`Jsog::add`].
    pub fn add_all<I>(&self, values: I) -> &Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        for value in values {
            self.add(value);
        }
        self
    }

    /// Treats this node as an object and stores `value` under `key`.
    ///
    /// If the node is not currently an object its previous contents are
    /// discarded and it becomes a fresh empty object first.
    pub fn put(&self, key: impl Into<String>, value: impl Into<Value>) -> &Self {
        let key = key.into();
        let value = value.into();
        let mut inner = self.inner.borrow_mut();
        inner.force_object().insert(key, value);
        inner.mod_count += 1;
        self
    }

    /// Stores every `(key, value)` pair in the iterator. Not atomic: this
    /// is a plain loop over [`Jsog::put`].
    pub fn put_all<I, K, V>(&self, entries: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.put(key, value);
        }
        self
    }

    /// Removes an object entry, returning the raw removed slot, or `None`
    /// if the key was absent.
    ///
    /// Removal never creates structure: a non-object node (null included)
    /// fails with `NotAnObject`.
    pub fn remove(&self, key: &str) -> Result<Option<Value>, JsogError> {
        let mut inner = self.inner.borrow_mut();
        match &mut inner.value {
            NodeValue::Object(map) => {
                let removed = map.shift_remove(key);
                if removed.is_some() {
                    inner.mod_count += 1;
                }
                Ok(removed)
            }
            _ => Err(JsogError::NotAnObject),
        }
    }

    /// Removes the array element at `index`, returning the raw removed
    /// slot. Fails with `NotAnArray` on non-arrays and `IndexOutOfRange`
    /// past the end.
    pub fn remove_index(&self, index: usize) -> Result<Value, JsogError> {
        let mut inner = self.inner.borrow_mut();
        match &mut inner.value {
            NodeValue::Array(list) => {
                if index >= list.len() {
                    let len = list.len();
                    return Err(JsogError::IndexOutOfRange { index, len });
                }
                let removed = list.remove(index);
                inner.mod_count += 1;
                Ok(removed)
            }
            _ => Err(JsogError::NotAnArray),
        }
    }

    /// Empties an array or object in place; resets anything else to null.
    pub fn clear(&self) -> &Self {
        let mut inner = self.inner.borrow_mut();
        match &mut inner.value {
            NodeValue::Array(list) => list.clear(),
            NodeValue::Object(map) => map.clear(),
            value => *value = NodeValue::Scalar(Primitive::Null),
        }
        inner.mod_count += 1;
        self
    }

    /// Navigates to an object field, creating it if missing.
    ///
    /// A null node is coerced to an object; a missing (or raw-null) key
    /// gets a fresh null child node inserted, so repeated lookups return
    /// the *same* live child and chained writes land in this tree:
    ///
    /// ```
    /// use jsog::Jsog;
    ///
    /// let root = Jsog::object();
    /// root.get("a").unwrap().get("b").unwrap().set("x");
    /// assert_eq!(root.to_string(), r#"{"a":{"b":"x"}}"#);
    /// ```
    ///
    /// A non-null, non-object node fails with `NotAnObject` rather than
    /// clobbering data.
    pub fn get(&self, key: &str) -> Result<Jsog, JsogError> {
        let mut inner = self.inner.borrow_mut();
        match &mut inner.value {
            NodeValue::Scalar(Primitive::Null) => {
                let child = Jsog::new();
                let mut map = IndexMap::new();
                map.insert(key.to_string(), Value::Node(child.clone()));
                inner.value = NodeValue::Object(map);
                inner.mod_count += 1;
                Ok(child)
            }
            NodeValue::Object(map) => {
                match map.get(key) {
                    Some(Value::Node(node)) => return Ok(node.clone()),
                    Some(Value::Primitive(p)) if !p.is_null() => {
                        return Ok(Jsog::from_primitive(p.clone()))
                    }
                    // A missing key and a stored raw null both get a fresh
                    // live child.
                    _ => {}
                }
                let child = Jsog::new();
                map.insert(key.to_string(), Value::Node(child.clone()));
                inner.mod_count += 1;
                Ok(child)
            }
            _ => Err(JsogError::NotAnObject),
        }
    }

    /// Returns the array element at `index`, wrapping raw primitives.
    ///
    /// Unlike [`Jsog::get`] there is no auto-vivification: non-arrays fail
    /// with `NotAnArray` and out-of-bounds indices with `IndexOutOfRange`.
    pub fn at(&self, index: usize) -> Result<Jsog, JsogError> {
        let inner = self.inner.borrow();
        match &inner.value {
            NodeValue::Array(list) => match list.get(index) {
                Some(slot) => Ok(Jsog::wrap(slot)),
                None => Err(JsogError::IndexOutOfRange {
                    index,
                    len: list.len(),
                }),
            },
            _ => Err(JsogError::NotAnArray),
        }
    }

    /// Tests whether an object contains `key`. A null node has no keys; a
    /// non-object, non-null node fails with `NotAnObject`.
    pub fn has_key(&self, key: &str) -> Result<bool, JsogError> {
        let inner = self.inner.borrow();
        match &inner.value {
            NodeValue::Scalar(Primitive::Null) => Ok(false),
            NodeValue::Object(map) => Ok(map.contains_key(key)),
            _ => Err(JsogError::NotAnObject),
        }
    }

    /// The element or entry count of an array or object.
    pub fn size(&self) -> Result<usize, JsogError> {
        let inner = self.inner.borrow();
        match &inner.value {
            NodeValue::Array(list) => Ok(list.len()),
            NodeValue::Object(map) => Ok(map.len()),
            _ => Err(JsogError::NotAnArrayOrObject),
        }
    }

    /// The object's keys in insertion order. Empty for a null node.
    pub fn keys(&self) -> Result<Vec<String>, JsogError> {
        let inner = self.inner.borrow();
        match &inner.value {
            NodeValue::Scalar(Primitive::Null) => Ok(Vec::new()),
            NodeValue::Object(map) => Ok(map.keys().cloned().collect()),
            _ => Err(JsogError::NotAnObject),
        }
    }

    /// The index of the first array slot equal to `value` (strict slot
    /// equality), or `None`.
    pub fn index_of(&self, value: impl Into<Value>) -> Result<Option<usize>, JsogError> {
        let value = value.into();
        let inner = self.inner.borrow();
        match &inner.value {
            NodeValue::Array(list) => Ok(list.iter().position(|slot| *slot == value)),
            _ => Err(JsogError::NotAnArray),
        }
    }

    /// Tests whether the array contains a slot equal to `value`.
    pub fn contains(&self, value: impl Into<Value>) -> Result<bool, JsogError> {
        Ok(self.index_of(value)?.is_some())
    }

    /// The raw value of a scalar or node-reference node. Containers have no
    /// single raw value and fail with `NotAPrimitive`.
    pub fn get_value(&self) -> Result<Value, JsogError> {
        let inner = self.inner.borrow();
        match &inner.value {
            NodeValue::Scalar(p) => Ok(Value::Primitive(p.clone())),
            NodeValue::Ref(node) => Ok(Value::Node(node.clone())),
            _ => Err(JsogError::NotAPrimitive),
        }
    }

    /// An iterator over object entries, in insertion order.
    ///
    /// Empty for a null node; fails with `NotAnObject` for other shapes.
    /// The iterator is fail-fast: a structural mutation of this node after
    /// creation makes `next()` yield `ConcurrentModification`.
    pub fn entries(&self) -> Result<Entries, JsogError> {
        Entries::new(self)
    }

    /// An iterator over array elements. Empty for a null node; fails with
    /// `NotAnArray` for other shapes. Fail-fast like [`Jsog::entries`].
    pub fn elements(&self) -> Result<Elements, JsogError> {
        Elements::new(self)
    }

    /// Evaluates a path expression against this node.
    ///
    /// Compiles on every call; callers evaluating the same expression
    /// repeatedly should compile once with [`JsogPath::compile`] and reuse.
    pub fn path(&self, path: &str) -> Result<Jsog, JsogError> {
        JsogPath::query(path, self)
    }

    /// Merges `source` into `destination`.
    ///
    /// - Object sources merge key by key: primitive values overwrite,
    ///   container values merge recursively into the destination branch
    ///   (auto-vivifying it as needed).
    /// - Array sources are purely additive: the destination becomes an
    ///   array if it is not one (even for an empty source), and source
    ///   elements are appended after any existing elements.
    /// - Anything else replaces the destination's value outright.
    ///
    /// ```
    /// use jsog::Jsog;
    ///
    /// let dst = Jsog::parse(r#"{"a":"old","b":"keep"}"#).unwrap();
    /// let src = Jsog::parse(r#"{"a":"new"}"#).unwrap();
    /// Jsog::merge(&src, &dst).unwrap();
    /// assert_eq!(dst.to_string(), r#"{"a":"new","b":"keep"}"#);
    /// ```
    pub fn merge(source: &Jsog, destination: &Jsog) -> Result<(), JsogError> {
        if source.is_object() {
            for key in source.keys()? {
                let child = source.get(&key)?;
                if child.is_primitive() {
                    destination.put(key, child.get_value()?);
                } else {
                    let branch = destination.get(&key)?;
                    Jsog::merge(&child, &branch)?;
                    destination.put(key, branch);
                }
            }
        } else if source.is_array() {
            // Even an empty source array forces the destination's shape.
            destination.force_array_shape();
            for index in 0..source.size()? {
                let element = source.at(index)?;
                if element.is_primitive() {
                    destination.add(element.get_value()?);
                } else {
                    let merged = Jsog::new();
                    Jsog::merge(&element, &merged)?;
                    destination.add(merged);
                }
            }
        } else {
            destination.set(source.get_value()?);
        }
        Ok(())
    }

    /// Merges another node into this one. See [`Jsog::merge`].
    pub fn merge_from(&self, source: &Jsog) -> Result<&Self, JsogError> {
        Jsog::merge(source, self)?;
        Ok(self)
    }

    /// A deep copy of this node, built by merging into a fresh null node.
    pub fn deep_clone(&self) -> Jsog {
        let copy = Jsog::new();
        Jsog::merge(self, &copy).expect("merging into a fresh null node cannot fail");
        copy
    }

    fn force_array_shape(&self) {
        let mut inner = self.inner.borrow_mut();
        if !matches!(inner.value, NodeValue::Array(_)) {
            inner.value = NodeValue::Array(Vec::new());
            inner.mod_count += 1;
        }
    }

    /// The scalar string form: `None` for null, the loose text otherwise.
    pub fn string_value(&self) -> Result<Option<String>, JsogError> {
        match self.get_value()? {
            Value::Node(node) => node.string_value(),
            Value::Primitive(p) => Ok(p.to_text()),
        }
    }

    /// The boolean form: `true` iff the string form is `true`, ignoring
    /// ASCII case. Never fails on a scalar.
    pub fn bool_value(&self) -> Result<Option<bool>, JsogError> {
        match self.get_value()? {
            Value::Node(node) => node.bool_value(),
            Value::Primitive(Primitive::Null) => Ok(None),
            Value::Primitive(Primitive::Bool(b)) => Ok(Some(b)),
            Value::Primitive(p) => {
                let text = p.to_text().unwrap_or_default();
                Ok(Some(text.eq_ignore_ascii_case("true")))
            }
        }
    }

    /// The arbitrary-precision integer form. Floats and decimals truncate
    /// toward zero; strings parse, failing with `InvalidNumber` otherwise.
    pub fn bigint_value(&self) -> Result<Option<BigInt>, JsogError> {
        let p = match self.get_value()? {
            Value::Node(node) => return node.bigint_value(),
            Value::Primitive(p) => p,
        };
        let out = match &p {
            Primitive::Null => return Ok(None),
            Primitive::Int(i) => BigInt::from(*i),
            Primitive::Float(f) => BigInt::from(*f as i64),
            Primitive::BigInt(b) => b.clone(),
            Primitive::BigDecimal(d) => {
                let truncated = d.with_scale_round(0, bigdecimal::RoundingMode::Down);
                truncated
                    .to_string()
                    .parse::<BigInt>()
                    .map_err(|_| JsogError::invalid_number(&p, "BigInt"))?
            }
            other => other
                .to_text()
                .unwrap_or_default()
                .parse::<BigInt>()
                .map_err(|_| JsogError::invalid_number(&p, "BigInt"))?,
        };
        Ok(Some(out))
    }

    /// The arbitrary-precision decimal form. Strings and booleans parse
    /// their text form, failing with `InvalidNumber` otherwise.
    pub fn bigdecimal_value(&self) -> Result<Option<BigDecimal>, JsogError> {
        let p = match self.get_value()? {
            Value::Node(node) => return node.bigdecimal_value(),
            Value::Primitive(p) => p,
        };
        let out = match &p {
            Primitive::Null => return Ok(None),
            Primitive::Int(i) => BigDecimal::from(*i),
            Primitive::BigInt(b) => BigDecimal::from(b.clone()),
            Primitive::BigDecimal(d) => d.clone(),
            other => {
                let text = other.to_text().unwrap_or_default();
                text.parse::<BigDecimal>()
                    .map_err(|_| JsogError::invalid_number(&p, "BigDecimal"))?
            }
        };
        Ok(Some(out))
    }

    /// The `f64` form. Integers widen, strings parse (overflowing to
    /// infinity like any float parse), non-numeric text fails.
    pub fn f64_value(&self) -> Result<Option<f64>, JsogError> {
        let p = match self.get_value()? {
            Value::Node(node) => return node.f64_value(),
            Value::Primitive(p) => p,
        };
        let out = match &p {
            Primitive::Null => return Ok(None),
            Primitive::Int(i) => *i as f64,
            Primitive::Float(f) => *f,
            Primitive::BigDecimal(d) => d
                .to_f64()
                .ok_or_else(|| JsogError::invalid_number(&p, "f64"))?,
            other => other
                .to_text()
                .unwrap_or_default()
                .parse::<f64>()
                .map_err(|_| JsogError::invalid_number(&p, "f64"))?,
        };
        Ok(Some(out))
    }

    /// The `f32` form; see [`Jsog::f64_value`].
    pub fn f32_value(&self) -> Result<Option<f32>, JsogError> {
        let p = match self.get_value()? {
            Value::Node(node) => return node.f32_value(),
            Value::Primitive(p) => p,
        };
        let out = match &p {
            Primitive::Null => return Ok(None),
            Primitive::Int(i) => *i as f32,
            Primitive::Float(f) => *f as f32,
            Primitive::BigDecimal(d) => d
                .to_f32()
                .ok_or_else(|| JsogError::invalid_number(&p, "f32"))?,
            other => other
                .to_text()
                .unwrap_or_default()
                .parse::<f32>()
                .map_err(|_| JsogError::invalid_number(&p, "f32"))?,
        };
        Ok(Some(out))
    }
}

macro_rules! int_accessor {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        impl Jsog {
            $(#[$doc])*
            pub fn $name(&self) -> Result<Option<$ty>, JsogError> {
                let p = match self.get_value()? {
                    Value::Node(node) => return node.$name(),
                    Value::Primitive(p) => p,
                };
                let out = match &p {
                    Primitive::Null => return Ok(None),
                    Primitive::Int(i) => *i as $ty,
                    Primitive::Float(f) => *f as $ty,
                    Primitive::BigInt(b) => <$ty>::try_from(b)
                        .map_err(|_| JsogError::invalid_number(&p, stringify!($ty)))?,
                    Primitive::BigDecimal(d) => d
                        .with_scale_round(0, bigdecimal::RoundingMode::Down)
                        .to_string()
                        .parse::<$ty>()
                        .map_err(|_| JsogError::invalid_number(&p, stringify!($ty)))?,
                    other => other
                        .to_text()
                        .unwrap_or_default()
                        .parse::<$ty>()
                        .map_err(|_| JsogError::invalid_number(&p, stringify!($ty)))?,
                };
                Ok(Some(out))
            }
        }
    };
}

int_accessor! {
    /// The `i64` form. Floats truncate toward zero, oversized big integers
    /// fail with `InvalidNumber`, strings parse at this width.
    i64_value, i64
}
int_accessor! {
    /// The `i32` form; numeric sources wrap, strings parse at this width.
    i32_value, i32
}
int_accessor! {
    /// The `i16` form; numeric sources wrap, strings parse at this width.
    i16_value, i16
}
int_accessor! {
    /// The `i8` form; numeric sources wrap, strings parse at this width.
    i8_value, i8
}

impl Inner {
    /// Coerces the value into an array, dropping previous contents of any
    /// other shape, and returns the list for mutation.
    fn force_array(&mut self) -> &mut Vec<Value> {
        if !matches!(self.value, NodeValue::Array(_)) {
            self.value = NodeValue::Array(Vec::new());
        }
        match &mut self.value {
            NodeValue::Array(list) => list,
            _ => unreachable!(),
        }
    }

    /// Coerces the value into an object, dropping previous contents of any
    /// other shape, and returns the map for mutation.
    fn force_object(&mut self) -> &mut IndexMap<String, Value> {
        if !matches!(self.value, NodeValue::Object(_)) {
            self.value = NodeValue::Object(IndexMap::new());
        }
        match &mut self.value {
            NodeValue::Object(map) => map,
            _ => unreachable!(),
        }
    }
}

impl Default for Jsog {
    fn default() -> Self {
        Jsog::new()
    }
}

/// Loose equality: primitives compare by their string form (so `1`, `"1"`
/// compare equal, as do `true` and `"true"`), arrays and objects compare
/// structurally with the same rule, and a null node equals only another
/// null node. All loose comparison flows through this one implementation.
impl PartialEq for Jsog {
    fn eq(&self, other: &Self) -> bool {
        loose_eq(self, other)
    }
}

fn loose_eq(a: &Jsog, b: &Jsog) -> bool {
    if Rc::ptr_eq(&a.inner, &b.inner) {
        return true;
    }
    let a_inner = a.inner.borrow();
    let b_inner = b.inner.borrow();
    match (&a_inner.value, &b_inner.value) {
        (NodeValue::Ref(target), _) => loose_eq(target, b),
        (_, NodeValue::Ref(target)) => loose_eq(a, target),
        (NodeValue::Scalar(p), NodeValue::Scalar(q)) => p.to_text() == q.to_text(),
        (NodeValue::Array(x), NodeValue::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(v, w)| slot_eq(v, w))
        }
        (NodeValue::Object(x), NodeValue::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, v)| y.get(key).is_some_and(|w| slot_eq(v, w)))
        }
        _ => false,
    }
}

/// Loose slot comparison used inside containers: raw primitives compare by
/// string form, nodes recurse, and a raw primitive compares against a
/// node's scalar value.
fn slot_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Primitive(p), Value::Primitive(q)) => p.to_text() == q.to_text(),
        (Value::Node(m), Value::Node(n)) => loose_eq(m, n),
        (Value::Primitive(p), Value::Node(n)) | (Value::Node(n), Value::Primitive(p)) => {
            primitive_vs_node(p, n)
        }
    }
}

fn primitive_vs_node(p: &Primitive, node: &Jsog) -> bool {
    let inner = node.inner.borrow();
    match &inner.value {
        NodeValue::Scalar(q) => p.to_text() == q.to_text(),
        NodeValue::Ref(target) => primitive_vs_node(p, target),
        _ => false,
    }
}

/// Renders the node as canonical JSON text.
impl fmt::Display for Jsog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        writer::write_node(self, &mut out);
        f.write_str(&out)
    }
}

impl fmt::Debug for Jsog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Jsog({self})")
    }
}
