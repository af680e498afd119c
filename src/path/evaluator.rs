//! Path evaluation against a document tree.

use super::ast::Segment;
use crate::document::{Jsog, JsogError};

/// Walks a segment chain from `root`, returning the node the final segment
/// lands on. Key steps auto-vivify; index steps do not.
pub(crate) fn evaluate(head: &Segment, root: &Jsog) -> Result<Jsog, JsogError> {
    let mut current = root.clone();
    let mut segment = head;
    loop {
        match segment {
            Segment::Root => return Ok(current),
            Segment::Key { key, next } => {
                current = current.get(key)?;
                segment = next.as_ref();
            }
            Segment::Index { index, next } => {
                current = current.at(*index)?;
                segment = next.as_ref();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::document::Jsog;
    use crate::path::JsogPath;

    #[test]
    fn test_root_returns_input() {
        let tree = Jsog::object_of("a", 1);
        let result = JsogPath::query("$", &tree).unwrap();
        result.put("b", 2);
        assert_eq!(tree.size().unwrap(), 2);
    }

    #[test]
    fn test_key_navigation() {
        let tree = Jsog::parse(r#"{"foo":{"bar":"baz"}}"#).unwrap();
        let result = JsogPath::query("$.foo.bar", &tree).unwrap();
        assert_eq!(result.string_value().unwrap().as_deref(), Some("baz"));
    }

    #[test]
    fn test_index_navigation_does_not_vivify() {
        let tree = Jsog::parse(r#"{"items":[1]}"#).unwrap();
        assert!(JsogPath::query("$.items[1]", &tree).is_err());
        assert_eq!(tree.get("items").unwrap().size().unwrap(), 1);
    }

    #[test]
    fn test_vivified_branch_is_live() {
        let tree = Jsog::object();
        let leaf = JsogPath::query("$.a.b.c", &tree).unwrap();
        assert!(leaf.is_null());
        leaf.set("x");
        assert_eq!(
            tree.get("a")
                .unwrap()
                .get("b")
                .unwrap()
                .get("c")
                .unwrap()
                .string_value()
                .unwrap()
                .as_deref(),
            Some("x")
        );
    }
}
