//! Fail-fast iteration over object entries and array elements.
//!
//! Iterators capture the node's structural modification counter at
//! creation; once the backing container is structurally mutated, `next()`
//! yields [`JsogError::ConcurrentModification`] instead of inconsistent
//! results. Iterating a null node yields nothing, matching the navigation
//! contract where null behaves as an empty container.

use super::error::JsogError;
use super::node::{Jsog, NodeValue, Primitive, Value};

/// An iterator over the entries of an object node, in insertion order.
///
/// Obtained from [`Jsog::entries`]. Yields `Result` items so a concurrent
/// structural modification surfaces as an error mid-iteration.
pub struct Entries {
    node: Jsog,
    expected: u64,
    pos: usize,
    last: Option<usize>,
    empty: bool,
}

impl Entries {
    pub(crate) fn new(node: &Jsog) -> Result<Entries, JsogError> {
        let inner = node.inner.borrow();
        let empty = match &inner.value {
            NodeValue::Scalar(Primitive::Null) => true,
            NodeValue::Object(_) => false,
            _ => return Err(JsogError::NotAnObject),
        };
        Ok(Entries {
            node: node.clone(),
            expected: inner.mod_count,
            pos: 0,
            last: None,
            empty,
        })
    }

    /// Removes the entry most recently yielded by `next()`.
    ///
    /// Removal through the iterator resynchronizes its captured counter,
    /// so iteration continues from the following entry.
    ///
    /// # Panics
    ///
    /// Panics if called before `next()` has yielded an entry, or twice for
    /// the same entry.
    pub fn remove(&mut self) -> Result<(), JsogError> {
        let index = self
            .last
            .take()
            .expect("remove() called before next() yielded an entry");
        let mut inner = self.node.inner.borrow_mut();
        if inner.mod_count != self.expected {
            return Err(JsogError::ConcurrentModification);
        }
        if let NodeValue::Object(map) = &mut inner.value {
            map.shift_remove_index(index);
            inner.mod_count += 1;
            self.expected = inner.mod_count;
            self.pos = index;
        }
        Ok(())
    }
}

impl Iterator for Entries {
    type Item = Result<ObjectEntry, JsogError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.empty {
            return None;
        }
        let inner = self.node.inner.borrow();
        if inner.mod_count != self.expected {
            return Some(Err(JsogError::ConcurrentModification));
        }
        let NodeValue::Object(map) = &inner.value else {
            return None;
        };
        let (key, _) = map.get_index(self.pos)?;
        let key = key.clone();
        self.last = Some(self.pos);
        self.pos += 1;
        Some(Ok(ObjectEntry {
            node: self.node.clone(),
            key,
        }))
    }
}

/// A single object entry yielded by [`Entries`].
///
/// The entry writes through to the backing object: [`ObjectEntry::set_value`]
/// replaces the stored slot in place.
pub struct ObjectEntry {
    node: Jsog,
    key: String,
}

impl ObjectEntry {
    /// The entry's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entry's current value, wrapped for navigation.
    pub fn value(&self) -> Jsog {
        let inner = self.node.inner.borrow();
        if let NodeValue::Object(map) = &inner.value {
            if let Some(slot) = map.get(&self.key) {
                return Jsog::wrap(slot);
            }
        }
        Jsog::new()
    }

    /// Replaces the entry's value, returning the old value wrapped.
    ///
    /// Primitive inputs are stored raw; node inputs are stored as live
    /// nodes, exactly like [`Jsog::put`].
    pub fn set_value(&self, value: impl Into<Value>) -> Jsog {
        let value = value.into();
        let mut inner = self.node.inner.borrow_mut();
        if let NodeValue::Object(map) = &mut inner.value {
            match map.insert(self.key.clone(), value) {
                Some(old) => Jsog::wrap(&old),
                None => Jsog::new(),
            }
        } else {
            Jsog::new()
        }
    }
}

/// An iterator over the elements of an array node.
///
/// Obtained from [`Jsog::elements`]. Yields wrapped elements; raw
/// primitives come back in fresh detached handles, node slots by identity.
pub struct Elements {
    node: Jsog,
    expected: u64,
    pos: usize,
    last: Option<usize>,
    empty: bool,
}

impl Elements {
    pub(crate) fn new(node: &Jsog) -> Result<Elements, JsogError> {
        let inner = node.inner.borrow();
        let empty = match &inner.value {
            NodeValue::Scalar(Primitive::Null) => true,
            NodeValue::Array(_) => false,
            _ => return Err(JsogError::NotAnArray),
        };
        Ok(Elements {
            node: node.clone(),
            expected: inner.mod_count,
            pos: 0,
            last: None,
            empty,
        })
    }

    /// Removes the element most recently yielded by `next()`.
    ///
    /// # Panics
    ///
    /// Panics if called before `next()` has yielded an element, or twice
    /// for the same element.
    pub fn remove(&mut self) -> Result<(), JsogError> {
        let index = self
            .last
            .take()
            .expect("remove() called before next() yielded an element");
        let mut inner = self.node.inner.borrow_mut();
        if inner.mod_count != self.expected {
            return Err(JsogError::ConcurrentModification);
        }
        if let NodeValue::Array(list) = &mut inner.value {
            list.remove(index);
            inner.mod_count += 1;
            self.expected = inner.mod_count;
            self.pos = index;
        }
        Ok(())
    }
}

impl Iterator for Elements {
    type Item = Result<Jsog, JsogError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.empty {
            return None;
        }
        let inner = self.node.inner.borrow();
        if inner.mod_count != self.expected {
            return Some(Err(JsogError::ConcurrentModification));
        }
        let NodeValue::Array(list) = &inner.value else {
            return None;
        };
        let slot = list.get(self.pos)?;
        let wrapped = Jsog::wrap(slot);
        self.last = Some(self.pos);
        self.pos += 1;
        Some(Ok(wrapped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_on_null_is_empty() {
        let node = Jsog::new();
        let mut it = node.entries().unwrap();
        assert!(it.next().is_none());
    }

    #[test]
    fn test_entries_on_array_fails() {
        assert!(matches!(Jsog::array().entries(), Err(JsogError::NotAnObject)));
    }

    #[test]
    fn test_elements_on_object_fails() {
        assert!(matches!(Jsog::object().elements(), Err(JsogError::NotAnArray)));
    }

    #[test]
    fn test_fail_fast_on_mutation() {
        let node = Jsog::object_of("foo", "bar");
        let mut it = node.entries().unwrap();
        node.put("bar", "baz");
        assert!(matches!(
            it.next(),
            Some(Err(JsogError::ConcurrentModification))
        ));
    }

    #[test]
    fn test_entry_set_value_returns_old() {
        let node = Jsog::object_of("foo", "bar");
        let mut it = node.entries().unwrap();
        let entry = it.next().unwrap().unwrap();
        let old = entry.set_value("qux");
        assert_eq!(old.string_value().unwrap().as_deref(), Some("bar"));
        assert_eq!(node.get("foo").unwrap().string_value().unwrap().as_deref(), Some("qux"));
    }

    #[test]
    fn test_iterator_remove_keeps_iterating() {
        let node = Jsog::array_of([1, 2, 3]);
        let mut it = node.elements().unwrap();
        it.next().unwrap().unwrap();
        it.remove().unwrap();
        let second = it.next().unwrap().unwrap();
        assert_eq!(second.i64_value().unwrap(), Some(2));
        assert_eq!(node.size().unwrap(), 2);
    }
}
