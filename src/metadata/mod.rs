// file: src/metadata/mod.rs
// version: 1.0.0
// guid: 1b47f414-2c94-45de-8c7c-4e7457dfe076

//! Provisioning metadata model
//!
//! [`Metadata`] wraps the raw metadata document in [`Attributes`] so every field
//! stays reachable by name, and adds typed accessors for the handful of fields
//! the network pipeline depends on. Hooks and command line overrides patch the
//! document in place after it has been loaded.

pub mod attributes;

pub use attributes::{AttrRef, Attributes};

use crate::error::NetworkingError;
use crate::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

/// Type name reported when a top level metadata key is missing
pub const METADATA_TYPE: &str = "Metadata";

/// Operating system the configuration is generated for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingSystem {
    #[serde(default)]
    pub distro: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl OperatingSystem {
    /// Distro identifier, lowercased; empty when unset
    pub fn distro_id(&self) -> String {
        self.distro.as_deref().unwrap_or_default().to_lowercase()
    }

    /// Version string; empty when unset
    pub fn version_str(&self) -> &str {
        self.version.as_deref().unwrap_or_default()
    }
}

/// Accept versions written either as `"7"` or `7`
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Host metadata with attribute-style access to every field
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    attrs: Attributes,
}

impl Metadata {
    /// Wrap a parsed metadata document
    ///
    /// The root must be a mapping. A missing `operating_system` is filled in
    /// with null distro and version so later overrides have somewhere to land.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(NetworkingError::metadata("metadata root must be a mapping"));
        }
        let mut attrs = Attributes::named(METADATA_TYPE, value);
        attrs.set_default("operating_system", json!({"distro": null, "version": null}))?;
        Ok(Self { attrs })
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(content)?)
    }

    /// Look up any top level field
    pub fn attr(&self, key: &str) -> Result<AttrRef<'_>> {
        self.attrs.attr(key)
    }

    /// Look up any top level field, returning `None` when absent
    pub fn get(&self, key: &str) -> Option<AttrRef<'_>> {
        self.attrs.get(key)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    pub fn hostname(&self) -> Result<&str> {
        self.str_field("hostname")
    }

    pub fn plan(&self) -> Result<&str> {
        self.str_field("plan")
    }

    pub fn network(&self) -> Result<AttrRef<'_>> {
        self.attr("network")
    }

    pub fn operating_system(&self) -> Result<OperatingSystem> {
        self.attrs.extract("operating_system")
    }

    /// Replace the operating system distro and version
    pub fn set_operating_system(&mut self, distro: &str, version: &str) -> Result<()> {
        self.attrs
            .set_path(&["operating_system", "distro"], distro.to_lowercase())?;
        self.attrs.set_path(&["operating_system", "version"], version)?;
        self.attrs.set_path(
            &["operating_system", "slug"],
            format!("{}_{}", distro.to_lowercase(), version),
        )
    }

    fn str_field(&self, key: &str) -> Result<&str> {
        let field = self.attr(key)?;
        field.as_str().ok_or_else(|| {
            NetworkingError::metadata(format!("'{}' must be a string, got {}", key, field.value()))
        })
    }
}

impl PartialEq<Value> for Metadata {
    fn eq(&self, other: &Value) -> bool {
        self.attrs == *other
    }
}

impl Serialize for Metadata {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.attrs.serialize(serializer)
    }
}
