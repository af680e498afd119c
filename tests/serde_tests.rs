//! Integration tests for serde interop.

use jsog::Jsog;
use serde::Serialize;

#[derive(Serialize)]
struct Account {
    name: String,
    limits: Limits,
    tags: Vec<String>,
}

#[derive(Serialize)]
struct Limits {
    rate: u32,
    burst: Option<u32>,
}

#[test]
fn test_from_serialize_matches_parsed_json() {
    let account = Account {
        name: "ada".into(),
        limits: Limits {
            rate: 100,
            burst: None,
        },
        tags: vec!["a".into(), "b".into()],
    };

    let tree = Jsog::from_serialize(&account).unwrap();
    let expected = Jsog::parse(&serde_json::to_string(&account).unwrap()).unwrap();
    assert_eq!(tree, expected);
    assert_eq!(
        tree.path("$.limits.rate").unwrap().i64_value().unwrap(),
        Some(100)
    );
}

#[test]
fn test_tree_serializes_to_its_display_form() {
    let tree = Jsog::parse(r#"{"a":[1,2],"b":null,"c":1.25}"#).unwrap();
    assert_eq!(serde_json::to_string(&tree).unwrap(), tree.to_string());
}

#[test]
fn test_tree_deserializes_from_json_text() {
    let tree: Jsog = serde_json::from_str(r#"{"deep":{"list":[true]}}"#).unwrap();
    assert_eq!(
        tree.path("$.deep.list[0]").unwrap().bool_value().unwrap(),
        Some(true)
    );
}
