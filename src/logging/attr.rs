//! Typed key/value attributes attached to records.

use serde::Serialize;
use serde_json::{Map, Value};

/// Name of the `tracing` field that carries a record's attributes.
///
/// Attribute keys are only known at runtime, while `tracing` fields are
/// declared at compile time, so the facade packs every attribute into this
/// one field as a JSON object and the renderers unpack it again.
pub(crate) const ATTRS_FIELD: &str = "attrs";

/// A single key/value pair attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    key: String,
    value: AttrValue,
}

/// Value side of an [`Attr`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    String(String),
    Any(Value),
    Group(Vec<Attr>),
}

impl Attr {
    /// String attribute.
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: AttrValue::String(value.into()),
        }
    }

    /// Attribute holding any serializable value.
    ///
    /// A value that fails to serialize is recorded as an `!ERROR:` string
    /// instead of being dropped.
    pub fn any<T: Serialize>(key: impl Into<String>, value: T) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| Value::String(format!("!ERROR:{}", e)));
        Self {
            key: key.into(),
            value: AttrValue::Any(value),
        }
    }

    /// Named group of nested attributes.
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            key: key.into(),
            value: AttrValue::Group(attrs),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    /// JSON form of the value. Groups become objects.
    pub fn to_json(&self) -> Value {
        match &self.value {
            AttrValue::String(s) => Value::String(s.clone()),
            AttrValue::Any(v) => v.clone(),
            AttrValue::Group(attrs) => Value::Object(collect(attrs)),
        }
    }
}

/// Fold attributes into an ordered JSON object. Later keys win.
fn collect<'a>(attrs: impl IntoIterator<Item = &'a Attr>) -> Map<String, Value> {
    let mut map = Map::new();
    for attr in attrs {
        map.insert(attr.key.clone(), attr.to_json());
    }
    map
}

/// Encode attributes for the [`ATTRS_FIELD`] field.
pub(crate) fn encode<'a>(attrs: impl IntoIterator<Item = &'a Attr>) -> String {
    Value::Object(collect(attrs)).to_string()
}

/// Decode an [`ATTRS_FIELD`] value. `None` if it is not a JSON object.
pub(crate) fn decode(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
