// file: src/metadata/attributes.rs
// version: 1.0.0
// guid: b7e016d2-eee7-4646-bdd9-0bf857d14446

//! Attribute-style access over arbitrary JSON-like metadata trees.
//!
//! Provisioning metadata arrives as loosely structured JSON. [`Attributes`] owns
//! such a tree and hands out borrowed [`AttrRef`] views that reach nested keys by
//! name. A missing key is always an [`NetworkingError::AttributeMissing`] error
//! carrying the container type and key; nothing is silently defaulted.

use crate::error::NetworkingError;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Type name reported for nested mappings
pub const MAPPING_TYPE: &str = "Attributes";
/// Type name reported for nested sequences
pub const SEQUENCE_TYPE: &str = "AttributeList";

/// Owned metadata tree with attribute-style accessors
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    type_name: &'static str,
    value: Value,
}

impl Attributes {
    /// Wrap a value, reporting missing keys against the generic mapping type
    pub fn new(value: Value) -> Self {
        Self::named(MAPPING_TYPE, value)
    }

    /// Wrap a value, reporting missing keys against `type_name`
    pub fn named(type_name: &'static str, value: Value) -> Self {
        Self { type_name, value }
    }

    /// Borrowed view of the root
    pub fn view(&self) -> AttrRef<'_> {
        AttrRef {
            type_name: self.type_name,
            value: &self.value,
        }
    }

    /// Look up a key on the root mapping
    pub fn attr(&self, key: &str) -> Result<AttrRef<'_>> {
        self.view().attr(key)
    }

    /// Look up a key, returning `None` when absent
    pub fn get(&self, key: &str) -> Option<AttrRef<'_>> {
        self.view().get(key)
    }

    /// Whether the root mapping carries `key`
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Deserialize the value stored under `key`
    pub fn extract<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.attr(key)?.extract()
    }

    /// Set a top level key, replacing any previous value
    pub fn set<V: Serialize>(&mut self, key: &str, value: V) -> Result<()> {
        self.set_path(&[key], value)
    }

    /// Set a nested key, creating intermediate mappings as needed
    pub fn set_path<V: Serialize>(&mut self, path: &[&str], value: V) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let type_name = self.type_name;
        let (last, parents) = path
            .split_last()
            .ok_or_else(|| NetworkingError::metadata("attribute path cannot be empty"))?;

        let mut node = &mut self.value;
        for segment in parents {
            let map = as_object_mut(node, type_name)?;
            node = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if node.is_null() {
                *node = Value::Object(Map::new());
            }
        }

        as_object_mut(node, type_name)?.insert(last.to_string(), value);
        Ok(())
    }

    /// Insert `value` under `key` only when the key is absent or null
    pub fn set_default<V: Serialize>(&mut self, key: &str, value: V) -> Result<()> {
        match self.get(key) {
            Some(existing) if !existing.is_null() => Ok(()),
            _ => self.set(key, value),
        }
    }

    /// The underlying value
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Consume the wrapper, returning the plain value
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl From<Value> for Attributes {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl PartialEq<Value> for Attributes {
    fn eq(&self, other: &Value) -> bool {
        &self.value == other
    }
}

impl Serialize for Attributes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

fn as_object_mut<'v>(value: &'v mut Value, type_name: &str) -> Result<&'v mut Map<String, Value>> {
    value.as_object_mut().ok_or_else(|| {
        NetworkingError::metadata(format!("'{}' is not a mapping and cannot hold attributes", type_name))
    })
}

/// Borrowed attribute view into part of a metadata tree
#[derive(Debug, Clone, Copy)]
pub struct AttrRef<'a> {
    type_name: &'static str,
    value: &'a Value,
}

impl<'a> AttrRef<'a> {
    fn child(value: &'a Value) -> Self {
        let type_name = match value {
            Value::Array(_) => SEQUENCE_TYPE,
            Value::Object(_) => MAPPING_TYPE,
            Value::String(_) => "str",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Null => "NoneType",
        };
        Self { type_name, value }
    }

    /// Type name used in missing-attribute errors
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Look up a key, failing with `AttributeMissing` when absent
    pub fn attr(&self, key: &str) -> Result<AttrRef<'a>> {
        self.get(key)
            .ok_or_else(|| NetworkingError::attribute_missing(self.type_name, key))
    }

    /// Look up a key, returning `None` when absent or when this is not a mapping
    pub fn get(&self, key: &str) -> Option<AttrRef<'a>> {
        self.value.as_object()?.get(key).map(AttrRef::child)
    }

    /// Subscript into a sequence
    pub fn index(&self, index: usize) -> Result<AttrRef<'a>> {
        self.value
            .as_array()
            .and_then(|items| items.get(index))
            .map(AttrRef::child)
            .ok_or_else(|| NetworkingError::attribute_missing(self.type_name, index.to_string()))
    }

    /// Items of a sequence; empty for anything else
    pub fn items(&self) -> impl Iterator<Item = AttrRef<'a>> + 'a {
        self.value
            .as_array()
            .map(|items| items.as_slice())
            .unwrap_or_default()
            .iter()
            .map(AttrRef::child)
    }

    /// Entries of a mapping in key order; empty for anything else
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, AttrRef<'a>)> + 'a {
        self.value
            .as_object()
            .into_iter()
            .flat_map(|map| map.iter())
            .map(|(k, v)| (k.as_str(), AttrRef::child(v)))
    }

    pub fn len(&self) -> usize {
        match self.value {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.value.as_str()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_i64()
    }

    /// Scalar rendered as a string; numbers and booleans are stringified
    pub fn to_text(&self) -> Option<String> {
        match self.value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// The borrowed plain value
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Deserialize this node into a typed structure
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.value.clone()).map_err(|e| {
            NetworkingError::metadata(format!("invalid '{}' value: {}", self.type_name, e))
        })
    }
}

impl PartialEq<Value> for AttrRef<'_> {
    fn eq(&self, other: &Value) -> bool {
        self.value == other
    }
}

impl PartialEq for AttrRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
