//! Integration tests for the lenient JSON reader and the canonical writer.

use jsog::{Jsog, JsogError};

#[test]
fn test_parse_empty_and_whitespace_yield_null() {
    assert!(Jsog::parse("").unwrap().is_null());
    assert!(Jsog::parse(" \n\t ").unwrap().is_null());
}

#[test]
fn test_parse_null_literal() {
    assert!(Jsog::parse("null").unwrap().is_null());
}

#[test]
fn test_parse_empty_containers() {
    let array = Jsog::parse("[]").unwrap();
    assert!(array.is_array());
    assert_eq!(array.size().unwrap(), 0);

    let object = Jsog::parse("{}").unwrap();
    assert!(object.is_object());
    assert_eq!(object.size().unwrap(), 0);
}

#[test]
fn test_parse_scenario() {
    let tree = Jsog::parse(r#"{"a":[1,"x",{"b":true}]}"#).unwrap();
    let a = tree.get("a").unwrap();
    assert_eq!(a.size().unwrap(), 3);
    assert_eq!(
        a.at(2).unwrap().get("b").unwrap().bool_value().unwrap(),
        Some(true)
    );
}

#[test]
fn test_parse_comments() {
    let tree = Jsog::parse(
        "// leading\n{\n  \"a\": 1, /* between */ \"b\": 2 // trailing\n}",
    )
    .unwrap();
    assert_eq!(tree.to_string(), r#"{"a":1,"b":2}"#);
}

#[test]
fn test_parse_single_quotes_and_bare_keys() {
    let tree = Jsog::parse("{foo: 'bar', _under$core: 'ok'}").unwrap();
    assert_eq!(
        tree.get("foo").unwrap().string_value().unwrap().as_deref(),
        Some("bar")
    );
    assert_eq!(
        tree.get("_under$core")
            .unwrap()
            .string_value()
            .unwrap()
            .as_deref(),
        Some("ok")
    );
}

#[test]
fn test_parse_numbers() {
    let tree = Jsog::parse(r#"[0, -5, 1.5, 2e3, -0.5]"#).unwrap();
    assert_eq!(tree.at(0).unwrap().i64_value().unwrap(), Some(0));
    assert_eq!(tree.at(1).unwrap().i64_value().unwrap(), Some(-5));
    assert_eq!(tree.at(2).unwrap().f64_value().unwrap(), Some(1.5));
    assert_eq!(tree.at(3).unwrap().f64_value().unwrap(), Some(2000.0));
    assert_eq!(tree.at(4).unwrap().f64_value().unwrap(), Some(-0.5));
}

#[test]
fn test_parse_number_overflowing_i64_becomes_bigint() {
    let tree = Jsog::parse("98765432109876543210987654321").unwrap();
    assert_eq!(
        tree.string_value().unwrap().as_deref(),
        Some("98765432109876543210987654321")
    );
    assert_eq!(tree.to_string(), "98765432109876543210987654321");
}

#[test]
fn test_parse_string_escapes() {
    let tree = Jsog::parse(r#""a\"b\\c\nd\teA""#).unwrap();
    assert_eq!(
        tree.string_value().unwrap().as_deref(),
        Some("a\"b\\c\nd\teA")
    );
}

#[test]
fn test_parse_bad_json_fails_with_position() {
    let err = Jsog::parse("{\n  \"a\": oops\n}").unwrap_err();
    match err {
        JsogError::Parse { line, .. } => assert_eq!(line, 2),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_parse_rejects_malformed_input() {
    assert!(Jsog::parse("{").is_err());
    assert!(Jsog::parse("[1,").is_err());
    assert!(Jsog::parse("{\"a\" 1}").is_err());
    assert!(Jsog::parse("[1] trailing").is_err());
    assert!(Jsog::parse("01").is_err());
    assert!(Jsog::parse("/* unterminated").is_err());
}

#[test]
fn test_round_trip_loose_equality() {
    let sources = [
        r#"{"a":[1,"x",{"b":true}],"c":null}"#,
        "[1,2.5,\"s\",false,null]",
        r#""plain""#,
        "42",
    ];
    for source in sources {
        let tree = Jsog::parse(source).unwrap();
        let reparsed = Jsog::parse(&tree.to_string()).unwrap();
        assert_eq!(tree, reparsed, "round trip failed for {source}");
    }
}

#[test]
fn test_output_is_standard_json() {
    let tree = Jsog::parse("{a: 'b' /* note */}").unwrap();
    // Lenient input renders with quoted keys and double quotes.
    assert_eq!(tree.to_string(), r#"{"a":"b"}"#);
}

#[test]
fn test_output_preserves_insertion_order() {
    let tree = Jsog::parse(r#"{"z":1,"a":2,"m":3}"#).unwrap();
    assert_eq!(tree.to_string(), r#"{"z":1,"a":2,"m":3}"#);
}
