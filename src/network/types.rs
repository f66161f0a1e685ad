// file: src/network/types.rs
// version: 1.0.0
// guid: 12922e0f-5325-4e10-903a-5c48efd6cd19

//! Network data types shared by the resolver, bond grouper and distro builders

use crate::collections::Queryable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// IP address assignment taken from metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address: String,
    pub address_family: u8,
    pub cidr: u8,
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default)]
    pub netmask: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    /// Fields not modelled above, kept for templates
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Address {
    pub fn is_public(&self) -> bool {
        self.public.unwrap_or(false)
    }

    pub fn is_management(&self) -> bool {
        self.management.unwrap_or(false)
    }
}

impl Queryable for Address {
    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "address" => Some(Value::from(self.address.clone())),
            "address_family" => Some(Value::from(self.address_family)),
            "cidr" => Some(Value::from(self.cidr)),
            "gateway" => self.gateway.clone().map(Value::from),
            "netmask" => self.netmask.clone().map(Value::from),
            "network" => self.network.clone().map(Value::from),
            "management" => self.management.map(Value::from),
            "public" => self.public.map(Value::from),
            other => self.extra.get(other).cloned(),
        }
    }
}

/// NIC reported by interface discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalInterface {
    pub name: String,
    pub mac: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    /// Alternative names keyed by naming scheme, e.g. `LOGICAL`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<String, String>,
}

impl PhysicalInterface {
    pub fn new(name: impl Into<String>, mac: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mac: mac.into(),
            driver: None,
            names: BTreeMap::new(),
        }
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    pub fn with_name(mut self, scheme: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(scheme.into(), name.into());
        self
    }
}

/// Declared interface after it has been matched to a physical NIC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalInterface {
    pub name: String,
    pub mac: String,
    /// Name the interface had in metadata before the physical name replaced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bond: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcp: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogicalInterface {
    pub fn new(name: impl Into<String>, mac: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mac: mac.into(),
            meta_name: None,
            bond: None,
            dhcp: None,
            driver: None,
            names: BTreeMap::new(),
            extra: Map::new(),
        }
    }

    pub fn with_bond(mut self, bond: impl Into<String>) -> Self {
        self.bond = Some(bond.into());
        self
    }

    pub fn with_meta_name(mut self, meta_name: impl Into<String>) -> Self {
        self.meta_name = Some(meta_name.into());
        self
    }

    /// Bond tag, treating an empty string as untagged
    pub fn bond_name(&self) -> Option<&str> {
        self.bond.as_deref().filter(|b| !b.is_empty())
    }

    /// Only an explicit `dhcp: true` counts
    pub fn is_dhcp(&self) -> bool {
        self.dhcp == Some(true)
    }

    /// Metadata name, falling back to the current name
    pub fn metadata_name(&self) -> &str {
        self.meta_name.as_deref().unwrap_or(&self.name)
    }
}

impl Queryable for LogicalInterface {
    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "name" => Some(Value::from(self.name.clone())),
            "mac" => Some(Value::from(self.mac.clone())),
            "meta_name" => self.meta_name.clone().map(Value::from),
            "bond" => self.bond.clone().map(Value::from),
            "dhcp" => self.dhcp.map(Value::from),
            "driver" => self.driver.clone().map(Value::from),
            other => self.extra.get(other).cloned(),
        }
    }
}

/// Bonding mode as written in metadata, either numeric or symbolic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BondMode {
    Number(u64),
    Name(String),
}

impl Default for BondMode {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl BondMode {
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Name(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for BondMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Name(s) => write!(f, "{}", s),
        }
    }
}

/// Bonding policy from `network.bonding`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bonding {
    #[serde(default)]
    pub link_aggregation: Option<String>,
    #[serde(default)]
    pub mode: BondMode,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bonding {
    fn aggregation(&self) -> &str {
        self.link_aggregation.as_deref().unwrap_or_default()
    }

    /// Hosts whose interfaces are aggregated into bonds
    pub fn is_bonded(&self) -> bool {
        matches!(self.aggregation(), "bonded" | "mlag_ha")
    }

    /// Hosts whose interfaces are configured one by one
    pub fn is_individual(&self) -> bool {
        self.aggregation() == "individual"
    }
}
