// file: src/network/resolver.rs
// version: 1.0.0
// guid: 04fd0aaf-0339-4a2b-bc69-3067e41c0f4f

//! Matching of metadata-declared interfaces to discovered NICs

use crate::collections::{InterfaceList, WhereList};
use crate::error::NetworkingError;
use crate::network::types::{LogicalInterface, PhysicalInterface};
use crate::Result;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Match each declared interface to the physical NICs sharing its MAC
///
/// Declared fields are overlaid with the physical ones, so a renamed NIC keeps
/// its discovered name and the metadata name moves to `meta_name`. Unmatched
/// declarations are dropped; an empty result for a non-empty declaration list
/// is an error.
pub fn resolve_interfaces(
    declared: &[Value],
    discovered: &[PhysicalInterface],
) -> Result<InterfaceList> {
    let mut resolved = Vec::new();

    for spec in declared {
        let spec_map = spec.as_object().ok_or_else(|| {
            NetworkingError::metadata(format!("declared interface must be a mapping, got {}", spec))
        })?;
        let mac = spec_map
            .get("mac")
            .and_then(Value::as_str)
            .ok_or_else(|| NetworkingError::attribute_missing("Attributes", "mac"))?;

        let matches: Vec<&PhysicalInterface> = discovered
            .iter()
            .filter(|nic| nic.mac.eq_ignore_ascii_case(mac))
            .collect();

        if matches.is_empty() {
            let name = spec_map.get("name").and_then(serde_json::Value::as_str).unwrap_or("?");
            warn!("Declared interface {} ({}) has no matching physical interface", name, mac);
            continue;
        }

        for nic in matches {
            resolved.push(merge(spec_map, nic)?);
        }
    }

    if resolved.is_empty() && !declared.is_empty() {
        debug!("Physical interfaces: {:?}", discovered);
        debug!("Metadata interfaces: {:?}", declared);
        return Err(NetworkingError::NoInterfacesMatched {
            declared: declared.len(),
            discovered: discovered.len(),
        });
    }

    Ok(WhereList::new(resolved))
}

fn merge(spec: &Map<String, Value>, nic: &PhysicalInterface) -> Result<LogicalInterface> {
    let mut merged = spec.clone();
    if let Value::Object(physical) = serde_json::to_value(nic)? {
        merged.extend(physical);
    }
    merged.insert(
        "meta_name".to_string(),
        spec.get("name").cloned().unwrap_or(Value::Null),
    );

    let iface: LogicalInterface = serde_json::from_value(Value::Object(merged))?;
    debug!(
        "Matched {} to {} ({})",
        iface.metadata_name(),
        iface.name,
        iface.mac
    );
    Ok(iface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MAC_A: &str = "00:0c:29:51:53:a1";
    const MAC_B: &str = "00:0c:29:51:53:a2";

    #[test]
    fn test_physical_name_wins_and_order_follows_declaration() {
        // Arrange
        let declared = vec![
            json!({"name": "eth0", "mac": MAC_A, "bond": "bond0"}),
            json!({"name": "eth1", "mac": MAC_B, "bond": "bond0"}),
        ];
        let discovered = vec![
            PhysicalInterface::new("enp0", MAC_B),
            PhysicalInterface::new("enp1", MAC_A),
        ];

        // Act
        let resolved = resolve_interfaces(&declared, &discovered).unwrap();

        // Assert
        let summary: Vec<_> = resolved
            .iter()
            .map(|i| (i.meta_name.as_deref(), i.name.as_str(), i.mac.as_str(), i.bond.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some("eth0"), "enp1", MAC_A, Some("bond0")),
                (Some("eth1"), "enp0", MAC_B, Some("bond0")),
            ]
        );
    }

    #[test]
    fn test_mac_comparison_ignores_case() {
        let declared = vec![json!({"name": "eth0", "mac": MAC_A.to_uppercase()})];
        let discovered = vec![PhysicalInterface::new("eth0", MAC_A)];
        let resolved = resolve_interfaces(&declared, &discovered).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].mac, MAC_A);
    }

    #[test]
    fn test_unmatched_declarations_are_dropped() {
        let declared = vec![
            json!({"name": "eth0", "mac": MAC_A}),
            json!({"name": "eth1", "mac": "ff:ff:ff:ff:ff:ff"}),
        ];
        let discovered = vec![PhysicalInterface::new("eth0", MAC_A)];
        let resolved = resolve_interfaces(&declared, &discovered).unwrap();
        assert_eq!(resolved.len(), 1);
        assert!(resolved.len() <= declared.len());
    }

    #[test]
    fn test_unmatched_declaration_without_name_is_dropped() {
        let declared = vec![json!({"mac": "ff:ff:ff:ff:ff:ff"}), json!({"name": "eth0", "mac": MAC_A})];
        let discovered = vec![PhysicalInterface::new("enp0", MAC_A)];
        let resolved = resolve_interfaces(&declared, &discovered).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "enp0");
    }

    #[test]
    fn test_no_matches_is_an_error() {
        let declared = vec![json!({"name": "eth0", "mac": MAC_A})];
        let discovered = vec![PhysicalInterface::new("eth0", MAC_B)];
        let err = resolve_interfaces(&declared, &discovered).unwrap_err();
        assert!(matches!(
            err,
            NetworkingError::NoInterfacesMatched { declared: 1, discovered: 1 }
        ));
    }

    #[test]
    fn test_empty_declaration_list_is_not_an_error() {
        let resolved = resolve_interfaces(&[], &[PhysicalInterface::new("eth0", MAC_A)]).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_physical_driver_and_names_are_merged() {
        let declared = vec![json!({"name": "eth0", "mac": MAC_A, "dhcp": true})];
        let discovered = vec![PhysicalInterface::new("enp1s0f0", MAC_A)
            .with_driver("ixgbe")
            .with_name("LOGICAL", "eth0")];
        let resolved = resolve_interfaces(&declared, &discovered).unwrap();
        let iface = &resolved[0];
        assert_eq!(iface.driver.as_deref(), Some("ixgbe"));
        assert_eq!(iface.names.get("LOGICAL").map(String::as_str), Some("eth0"));
        assert!(iface.is_dhcp());
    }
}
