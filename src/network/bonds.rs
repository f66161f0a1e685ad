// file: src/network/bonds.rs
// version: 1.0.0
// guid: 6b0f5d7e-93a1-4c2e-8f4d-2d7a1c9e5b30

//! Grouping of resolved interfaces into named bonds

use crate::network::types::LogicalInterface;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use tracing::warn;

/// Named bond and its member interfaces in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub name: String,
    pub interfaces: Vec<LogicalInterface>,
}

/// Bonds in the order their names were first seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BondGroups {
    bonds: Vec<Bond>,
}

impl BondGroups {
    pub fn get(&self, name: &str) -> Option<&Bond> {
        self.bonds.iter().find(|b| b.name == name)
    }

    /// Members of `name`, empty when the bond does not exist
    pub fn members(&self, name: &str) -> &[LogicalInterface] {
        self.get(name).map(|b| b.interfaces.as_slice()).unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bonds.iter().map(|b| b.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bond> {
        self.bonds.iter()
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }
}

impl Serialize for BondGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bonds.len()))?;
        for bond in &self.bonds {
            map.serialize_entry(&bond.name, &bond.interfaces)?;
        }
        map.end()
    }
}

/// Partition bond-tagged interfaces by bond name
///
/// Untagged interfaces are left out. An interface (by MAC) seen a second time
/// under any bond is ignored, so the first bond it appeared in keeps it.
pub fn group_bonds(interfaces: &[LogicalInterface]) -> BondGroups {
    let mut groups = BondGroups::default();
    let mut seen = HashSet::new();

    for iface in interfaces {
        let Some(bond_name) = iface.bond_name() else {
            continue;
        };
        if !seen.insert(iface.mac.to_lowercase()) {
            warn!(
                "Interface {} ({}) already grouped; ignoring its {} membership",
                iface.name, iface.mac, bond_name
            );
            continue;
        }

        match groups.bonds.iter_mut().find(|b| b.name == bond_name) {
            Some(bond) => bond.interfaces.push(iface.clone()),
            None => groups.bonds.push(Bond {
                name: bond_name.to_string(),
                interfaces: vec![iface.clone()],
            }),
        }
    }

    groups
}
