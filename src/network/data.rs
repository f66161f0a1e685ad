// file: src/network/data.rs
// version: 1.0.0
// guid: 5d4c3b2a-1f0e-4d9c-8b7a-6e5f4d3c2b1a

//! Resolved network model handed to the distro builders

use crate::collections::{AddressList, InterfaceList};
use crate::metadata::{AttrRef, Metadata};
use crate::network::bonds::{group_bonds, BondGroups};
use crate::network::resolver::resolve_interfaces;
use crate::network::types::{Address, Bonding, PhysicalInterface};
use crate::Result;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Private subnets assumed when metadata names none
pub const DEFAULT_PRIVATE_SUBNETS: &[&str] = &["10.0.0.0/8"];

/// Network section of the metadata after interface resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkData {
    pub bonding: Bonding,
    pub interfaces: InterfaceList,
    pub bonds: BondGroups,
    pub addresses: AddressList,
    pub resolvers: Vec<String>,
    pub private_subnets: Vec<String>,
}

impl NetworkData {
    /// Build the model from `metadata.network` and the discovered NICs
    ///
    /// `default_resolvers` is used when the metadata lists no resolvers.
    pub fn load(
        metadata: &Metadata,
        discovered: &[PhysicalInterface],
        default_resolvers: &[String],
    ) -> Result<Self> {
        let network = metadata.network()?;

        let bonding: Bonding = match network.get("bonding") {
            Some(b) if !b.is_null() => b.extract()?,
            _ => Bonding::default(),
        };

        let declared: Vec<Value> = network.attr("interfaces")?.items().map(|i| i.value().clone()).collect();
        let interfaces = resolve_interfaces(&declared, discovered)?;
        let bonds = group_bonds(interfaces.as_slice());

        let addresses: Vec<Address> = match network.get("addresses") {
            Some(a) if !a.is_null() => a.extract()?,
            _ => Vec::new(),
        };

        let resolvers = match string_list(network.get("resolvers")) {
            Some(list) if !list.is_empty() => list,
            _ => default_resolvers.to_vec(),
        };

        let private_subnets = string_list(network.get("private_subnets"))
            .or_else(|| string_list(metadata.get("private_subnets")))
            .unwrap_or_else(|| DEFAULT_PRIVATE_SUBNETS.iter().map(|s| s.to_string()).collect());

        debug!(
            "Loaded network: {} interfaces, {} bonds, {} addresses",
            interfaces.len(),
            bonds.len(),
            addresses.len()
        );

        Ok(Self {
            bonding,
            interfaces,
            bonds,
            addresses: AddressList::new(addresses),
            resolvers,
            private_subnets,
        })
    }

    /// Management public IPv4 addresses
    pub fn ipv4pub(&self) -> AddressList {
        self.addresses.management().public().ipv4()
    }

    /// Management public IPv6 addresses
    pub fn ipv6pub(&self) -> AddressList {
        self.addresses.management().public().ipv6()
    }

    /// Management private IPv4 addresses
    pub fn ipv4priv(&self) -> AddressList {
        self.addresses.management().private().ipv4()
    }

    /// Whether every resolved interface asked for DHCP
    pub fn dhcp(&self) -> bool {
        !self.interfaces.is_empty() && self.interfaces.iter().all(|i| i.is_dhcp())
    }
}

fn string_list(node: Option<AttrRef<'_>>) -> Option<Vec<String>> {
    let node = node?;
    if node.is_null() {
        return None;
    }
    Some(node.items().filter_map(|item| item.to_text()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MAC_A: &str = "00:0c:29:51:53:a1";
    const MAC_B: &str = "00:0c:29:51:53:a2";

    fn metadata(network: Value) -> Metadata {
        Metadata::from_value(json!({"hostname": "h1", "plan": "c3.small.x86", "network": network})).unwrap()
    }

    fn physical() -> Vec<PhysicalInterface> {
        vec![
            PhysicalInterface::new("enp0", MAC_A),
            PhysicalInterface::new("enp1", MAC_B),
        ]
    }

    #[test]
    fn test_load_resolves_and_groups() -> Result<()> {
        // Arrange
        let md = metadata(json!({
            "bonding": {"link_aggregation": "bonded", "mode": 4},
            "interfaces": [
                {"name": "eth0", "mac": MAC_A, "bond": "bond0"},
                {"name": "eth1", "mac": MAC_B, "bond": "bond0"}
            ],
            "addresses": [
                {"address": "147.75.1.2", "address_family": 4, "cidr": 31, "gateway": "147.75.1.1",
                 "netmask": "255.255.255.254", "network": "147.75.1.2", "public": true, "management": true},
                {"address": "10.1.2.3", "address_family": 4, "cidr": 31, "gateway": "10.1.2.2",
                 "netmask": "255.255.255.254", "network": "10.1.2.2", "public": false, "management": true}
            ]
        }));

        // Act
        let data = NetworkData::load(&md, &physical(), &["8.8.8.8".to_string()])?;

        // Assert
        assert!(data.bonding.is_bonded());
        assert_eq!(data.interfaces.len(), 2);
        assert_eq!(data.bonds.members("bond0").len(), 2);
        assert_eq!(data.ipv4pub().first().map(|a| a.address.as_str()), Some("147.75.1.2"));
        assert_eq!(data.ipv4priv().first().map(|a| a.address.as_str()), Some("10.1.2.3"));
        assert!(data.ipv6pub().first().is_none());
        assert_eq!(data.resolvers, vec!["8.8.8.8"]);
        assert_eq!(data.private_subnets, vec!["10.0.0.0/8"]);
        Ok(())
    }

    #[test]
    fn test_metadata_resolvers_and_subnets_take_precedence() -> Result<()> {
        let md = metadata(json!({
            "interfaces": [{"name": "eth0", "mac": MAC_A}],
            "addresses": [],
            "resolvers": ["1.1.1.1"],
            "private_subnets": ["192.168.0.0/16"]
        }));
        let data = NetworkData::load(&md, &physical(), &["8.8.8.8".to_string()])?;
        assert_eq!(data.resolvers, vec!["1.1.1.1"]);
        assert_eq!(data.private_subnets, vec!["192.168.0.0/16"]);
        Ok(())
    }

    #[test]
    fn test_missing_interfaces_is_attribute_error() {
        let md = metadata(json!({"addresses": []}));
        let err = NetworkData::load(&md, &physical(), &[]).unwrap_err();
        assert_eq!(err.to_string(), "'Attributes' has no attribute 'interfaces'");
    }

    #[test]
    fn test_dhcp_requires_every_interface() -> Result<()> {
        let md = metadata(json!({
            "interfaces": [
                {"name": "eth0", "mac": MAC_A, "dhcp": true},
                {"name": "eth1", "mac": MAC_B}
            ]
        }));
        let data = NetworkData::load(&md, &physical(), &[])?;
        assert!(!data.dhcp());

        let md = metadata(json!({"interfaces": [{"name": "eth0", "mac": MAC_A, "dhcp": true}]}));
        assert!(NetworkData::load(&md, &physical(), &[])?.dhcp());
        Ok(())
    }
}
