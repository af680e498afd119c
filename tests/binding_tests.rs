//! Integration tests for declarative argument binding.

use jsog::binding::{BindError, BindKind, BindingTable};
use jsog::{Jsog, Primitive, Value};

fn request() -> Jsog {
    Jsog::parse(
        r#"{
            "user": {"name": "ada", "admin": "true"},
            "page": {"number": "3", "size": 25}
        }"#,
    )
    .unwrap()
}

#[test]
fn test_binds_parameters_in_declaration_order() {
    let table = BindingTable::new()
        .param("name", "$.user.name", BindKind::String, true)
        .unwrap()
        .param("admin", "$.user.admin", BindKind::Bool, false)
        .unwrap()
        .param("page", "$.page.number", BindKind::I32, false)
        .unwrap()
        .param("size", "$.page.size", BindKind::I64, false)
        .unwrap();

    let args = table.apply(&request()).unwrap();
    assert_eq!(
        args,
        vec![
            Value::Primitive(Primitive::String("ada".into())),
            Value::Primitive(Primitive::Bool(true)),
            Value::Primitive(Primitive::Int(3)),
            Value::Primitive(Primitive::Int(25)),
        ]
    );
}

#[test]
fn test_required_parameter_missing_fails() {
    let table = BindingTable::new()
        .param("token", "$.auth.token", BindKind::String, true)
        .unwrap();
    match table.apply(&request()) {
        Err(BindError::Missing { name, path }) => {
            assert_eq!(name, "token");
            assert_eq!(path, r#"$["auth"]["token"]"#);
        }
        other => panic!("expected a missing-parameter error, got {other:?}"),
    }
}

#[test]
fn test_optional_parameter_missing_yields_null() {
    let table = BindingTable::new()
        .param("token", "$.auth.token", BindKind::String, false)
        .unwrap();
    let args = table.apply(&request()).unwrap();
    assert_eq!(args, vec![Value::Primitive(Primitive::Null)]);
}

#[test]
fn test_node_parameter_is_live() {
    let table = BindingTable::new()
        .param("user", "$.user", BindKind::Node, true)
        .unwrap();
    let input = request();
    let args = table.apply(&input).unwrap();
    let Value::Node(user) = &args[0] else {
        panic!("expected a node argument");
    };
    user.put("seen", true);
    assert!(input.get("user").unwrap().has_key("seen").unwrap());
}

#[test]
fn test_conversion_failure_reports_parameter() {
    let table = BindingTable::new()
        .param("size", "$.user.name", BindKind::I32, true)
        .unwrap();
    match table.apply(&request()) {
        Err(BindError::Document { name, .. }) => assert_eq!(name, "size"),
        other => panic!("expected a conversion error, got {other:?}"),
    }
}

#[test]
fn test_paths_compile_eagerly() {
    let err = BindingTable::new()
        .param("x", "$.a[", BindKind::Node, false)
        .unwrap_err();
    assert!(matches!(err, BindError::Path { .. }));
}
