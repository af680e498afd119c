//! serde interop.
//!
//! Bridges the document tree to the serde data model: a [`Jsog`] serializes
//! to any serde format, deserializes from any self-describing one, and
//! converts to and from `serde_json::Value`. [`Jsog::from_serialize`] turns
//! an arbitrary serializable value graph into a tree.
//!
//! Arbitrary-precision numbers have no serde representation; they serialize
//! as decimal strings, as do conversions to `serde_json::Value` for values
//! outside the native `i64`/`u64`/`f64` range.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value as JsonValue;

use super::node::{Jsog, NodeValue, Primitive, Value};

impl Serialize for Jsog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let inner = self.inner.borrow();
        match &inner.value {
            NodeValue::Scalar(p) => p.serialize(serializer),
            NodeValue::Ref(target) => target.serialize(serializer),
            NodeValue::Array(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for slot in list {
                    seq.serialize_element(slot)?;
                }
                seq.end()
            }
            NodeValue::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, slot) in map {
                    out.serialize_entry(key, slot)?;
                }
                out.end()
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Primitive(p) => p.serialize(serializer),
            Value::Node(node) => node.serialize(serializer),
        }
    }
}

impl Serialize for Primitive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Primitive::Null => serializer.serialize_unit(),
            Primitive::Bool(b) => serializer.serialize_bool(*b),
            Primitive::Int(i) => serializer.serialize_i64(*i),
            Primitive::Float(f) => serializer.serialize_f64(*f),
            Primitive::BigInt(b) => serializer.serialize_str(&b.to_string()),
            Primitive::BigDecimal(d) => serializer.serialize_str(&d.to_string()),
            Primitive::String(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Jsog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Ok(Jsog::from(&value))
    }
}

impl From<&JsonValue> for Jsog {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Jsog::new(),
            JsonValue::Bool(b) => Jsog::from(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Jsog::from(i)
                } else if let Some(u) = n.as_u64() {
                    Jsog::from(u)
                } else {
                    Jsog::from(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => Jsog::from(s.as_str()),
            JsonValue::Array(items) => {
                let array = Jsog::array();
                for item in items {
                    array.add(Jsog::from(item));
                }
                array
            }
            JsonValue::Object(entries) => {
                let object = Jsog::object();
                for (key, item) in entries {
                    object.put(key.clone(), Jsog::from(item));
                }
                object
            }
        }
    }
}

impl From<JsonValue> for Jsog {
    fn from(value: JsonValue) -> Self {
        Jsog::from(&value)
    }
}

impl From<&Jsog> for JsonValue {
    fn from(node: &Jsog) -> Self {
        let inner = node.inner.borrow();
        match &inner.value {
            NodeValue::Scalar(p) => JsonValue::from(p),
            NodeValue::Ref(target) => JsonValue::from(target),
            NodeValue::Array(list) => {
                JsonValue::Array(list.iter().map(slot_to_json).collect())
            }
            NodeValue::Object(map) => JsonValue::Object(
                map.iter()
                    .map(|(key, slot)| (key.clone(), slot_to_json(slot)))
                    .collect(),
            ),
        }
    }
}

impl From<&Primitive> for JsonValue {
    fn from(p: &Primitive) -> Self {
        match p {
            Primitive::Null => JsonValue::Null,
            Primitive::Bool(b) => JsonValue::Bool(*b),
            Primitive::Int(i) => JsonValue::from(*i),
            Primitive::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number)
            }
            Primitive::BigInt(b) => {
                if let Ok(i) = i64::try_from(b) {
                    JsonValue::from(i)
                } else if let Ok(u) = u64::try_from(b) {
                    JsonValue::from(u)
                } else {
                    JsonValue::String(b.to_string())
                }
            }
            Primitive::BigDecimal(d) => JsonValue::String(d.to_string()),
            Primitive::String(s) => JsonValue::String(s.clone()),
        }
    }
}

fn slot_to_json(slot: &Value) -> JsonValue {
    match slot {
        Value::Primitive(p) => JsonValue::from(p),
        Value::Node(node) => JsonValue::from(node),
    }
}

impl Jsog {
    /// Builds a tree from any serializable value graph.
    ///
    /// ```
    /// use jsog::Jsog;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Server {
    ///     host: String,
    ///     port: u16,
    /// }
    ///
    /// let tree = Jsog::from_serialize(&Server {
    ///     host: "localhost".into(),
    ///     port: 8080,
    /// })
    /// .unwrap();
    /// assert_eq!(tree.to_string(), r#"{"host":"localhost","port":8080}"#);
    /// ```
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Jsog, serde_json::Error> {
        Ok(Jsog::from(serde_json::to_value(value)?))
    }
}
