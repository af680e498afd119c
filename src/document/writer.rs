//! Canonical JSON output.
//!
//! Renders a node as compact standard JSON: keys and strings escaped per
//! JSON rules, floats always carrying a decimal point, `null` for null.
//! The lenient extensions accepted on input (comments, single quotes,
//! unquoted keys) never appear on output.

use super::node::{format_float, Jsog, NodeValue, Primitive, Value};

pub(crate) fn write_node(node: &Jsog, out: &mut String) {
    let inner = node.inner.borrow();
    match &inner.value {
        NodeValue::Scalar(p) => write_primitive(p, out),
        NodeValue::Ref(target) => write_node(target, out),
        NodeValue::Array(list) => {
            out.push('[');
            for (index, slot) in list.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_slot(slot, out);
            }
            out.push(']');
        }
        NodeValue::Object(map) => {
            out.push('{');
            for (index, (key, slot)) in map.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_slot(slot, out);
            }
            out.push('}');
        }
    }
}

fn write_slot(slot: &Value, out: &mut String) {
    match slot {
        Value::Primitive(p) => write_primitive(p, out),
        Value::Node(node) => write_node(node, out),
    }
}

fn write_primitive(p: &Primitive, out: &mut String) {
    match p {
        Primitive::Null => out.push_str("null"),
        Primitive::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Primitive::Int(i) => out.push_str(&i.to_string()),
        Primitive::Float(f) => {
            // JSON has no representation for NaN or infinities.
            if f.is_finite() {
                out.push_str(&format_float(*f));
            } else {
                out.push_str("null");
            }
        }
        Primitive::BigInt(b) => out.push_str(&b.to_string()),
        Primitive::BigDecimal(d) => out.push_str(&d.to_string()),
        Primitive::String(s) => write_string(s, out),
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
