//! Integration tests for path expressions: compilation, evaluation,
//! auto-vivification, and canonical rendering.

use jsog::{Jsog, JsogError, JsogPath, JsogPathError};

#[test]
fn test_root_evaluates_to_input() {
    let tree = Jsog::object_of("foo", "bar");
    let result = JsogPath::query("$", &tree).unwrap();
    result.put("baz", 1);
    assert_eq!(tree.size().unwrap(), 2);
}

#[test]
fn test_dot_navigation() {
    let tree = Jsog::object_of("foo", "bar");
    assert_eq!(
        JsogPath::query("$.foo", &tree)
            .unwrap()
            .string_value()
            .unwrap()
            .as_deref(),
        Some("bar")
    );
}

#[test]
fn test_dot_navigation_with_digits_and_dashes() {
    let tree = Jsog::object_of("foo-1", "a");
    tree.put("foo1", "b");
    assert_eq!(
        JsogPath::query("$.foo-1", &tree)
            .unwrap()
            .string_value()
            .unwrap()
            .as_deref(),
        Some("a")
    );
    assert_eq!(
        JsogPath::query("$.foo1", &tree)
            .unwrap()
            .string_value()
            .unwrap()
            .as_deref(),
        Some("b")
    );
}

#[test]
fn test_bracket_and_dot_forms_are_equivalent() {
    let tree = Jsog::object();
    tree.get("foo").unwrap().get("bar").unwrap().set("qux");
    for expr in ["$.foo.bar", "$.foo[\"bar\"]", "$['foo']['bar']"] {
        assert_eq!(
            JsogPath::query(expr, &tree)
                .unwrap()
                .string_value()
                .unwrap()
                .as_deref(),
            Some("qux"),
            "failed for {expr}"
        );
    }
}

#[test]
fn test_index_navigation() {
    let tree = Jsog::object();
    tree.put("items", Jsog::array_of(["a", "b"]));
    assert_eq!(
        JsogPath::query("$.items[1]", &tree)
            .unwrap()
            .string_value()
            .unwrap()
            .as_deref(),
        Some("b")
    );
}

#[test]
fn test_index_out_of_bounds_fails() {
    let tree = Jsog::object();
    tree.put("items", Jsog::array_of(["a"]));
    assert!(matches!(
        JsogPath::query("$.items[5]", &tree),
        Err(JsogError::IndexOutOfRange { index: 5, len: 1 })
    ));
}

#[test]
fn test_index_on_non_array_fails() {
    let tree = Jsog::object_of("items", "scalar");
    assert_eq!(
        JsogPath::query("$.items[0]", &tree),
        Err(JsogError::NotAnArray)
    );
}

#[test]
fn test_auto_vivification_creates_writable_branch() {
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

#[test]
fn test_compiled_path_is_reusable() {
    let path = JsogPath::compile("$.n").unwrap();
    let a = Jsog::object_of("n", 1);
    let b = Jsog::object_of("n", 2);
    assert_eq!(path.evaluate(&a).unwrap().i64_value().unwrap(), Some(1));
    assert_eq!(path.evaluate(&b).unwrap().i64_value().unwrap(), Some(2));
}

#[test]
fn test_unicode_escape_navigates() {
    let tree = Jsog::object_of("\u{f1}", "bar");
    assert_eq!(
        JsogPath::query(r"$.\u00f1", &tree)
            .unwrap()
            .string_value()
            .unwrap()
            .as_deref(),
        Some("bar")
    );
}

#[test]
fn test_compile_errors() {
    assert_eq!(JsogPath::compile(""), Err(JsogPathError::Empty));
    assert_eq!(
        JsogPath::compile("foo"),
        Err(JsogPathError::MustBeginWithRoot)
    );
    assert!(matches!(
        JsogPath::compile("$["),
        Err(JsogPathError::UnexpectedEnd { .. })
    ));
    assert!(matches!(
        JsogPath::compile("$[abc]"),
        Err(JsogPathError::MustBeQuoted { .. })
    ));
    assert!(matches!(
        JsogPath::compile("$['a'x]"),
        Err(JsogPathError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        JsogPath::compile("$.a!b"),
        Err(JsogPathError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        JsogPath::compile(r"$.\q"),
        Err(JsogPathError::InvalidEscape { found: 'q', .. })
    ));
    assert!(matches!(
        JsogPath::compile(r"$['\u12"),
        Err(JsogPathError::UnexpectedEnd { .. })
    ));
}

#[test]
fn test_to_string_renders_bracket_form() {
    assert_eq!(JsogPath::compile("$").unwrap().to_string(), "$");
    assert_eq!(JsogPath::compile("$[0]").unwrap().to_string(), "$[0]");
    assert_eq!(
        JsogPath::compile("$.foo").unwrap().to_string(),
        r#"$["foo"]"#
    );
    assert_eq!(
        JsogPath::compile("$.foo[0][\"bar\"]").unwrap().to_string(),
        r#"$["foo"][0]["bar"]"#
    );
}

#[test]
fn test_to_string_reparses_to_equivalent_path() {
    for expr in ["$", "$.a.b", "$['x'][3].y", r"$.ñ"] {
        let compiled = JsogPath::compile(expr).unwrap();
        let rendered = compiled.to_string();
        let reparsed = JsogPath::compile(&rendered).unwrap();
        assert_eq!(compiled, reparsed, "round trip failed for {expr}");
    }
}

#[test]
fn test_escape_fidelity_for_control_characters() {
    // A key containing a literal tab renders as \t and re-parses to the
    // same key.
    let tree = Jsog::object_of("a\tb", "v");
    let compiled = JsogPath::compile(r"$['a\tb']").unwrap();
    assert_eq!(
        compiled
            .evaluate(&tree)
            .unwrap()
            .string_value()
            .unwrap()
            .as_deref(),
        Some("v")
    );

    let rendered = compiled.to_string();
    assert_eq!(rendered, "$[\"a\\tb\"]");
    let reparsed = JsogPath::compile(&rendered).unwrap();
    assert_eq!(compiled, reparsed);
}

#[test]
fn test_escaped_quotes_round_trip() {
    let compiled = JsogPath::compile(r#"$['don\'t']"#).unwrap();
    let rendered = compiled.to_string();
    let reparsed = JsogPath::compile(&rendered).unwrap();
    assert_eq!(compiled, reparsed);
}

#[test]
fn test_query_surfaces_compile_errors_through_document_error() {
    let tree = Jsog::object();
    assert!(matches!(
        JsogPath::query("oops", &tree),
        Err(JsogError::Path(JsogPathError::MustBeginWithRoot))
    ));
}

#[test]
fn test_paths_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<JsogPath>();
}
