// file: src/hooks/logical_names.rs
// version: 1.0.0
// guid: e4b8a2c6-3d7f-4e19-a5c0-9b2d6f8e1a37

//! Use kernel-assigned interface names on plans that need them

use super::{BuilderHook, HookContext};
use crate::error::NetworkingError;
use crate::network::group_bonds;
use crate::Result;
use tracing::debug;

/// Plans whose interfaces keep their logical (kernel) names
pub const LOGICAL_NAME_PLANS: &[&str] = &["baremetal_hua"];

/// Naming scheme key holding the kernel name of a NIC
pub const LOGICAL_NAME_KEY: &str = "LOGICAL";

pub struct LogicalInterfaceNamesHook;

impl BuilderHook for LogicalInterfaceNamesHook {
    fn name(&self) -> &'static str {
        "logical_interface_names"
    }

    fn on_initialized(&self, ctx: &mut HookContext<'_>) -> Result<bool> {
        if !ctx.plan_in(LOGICAL_NAME_PLANS) {
            return Ok(false);
        }

        for iface in ctx.network.interfaces.iter_mut() {
            let logical = iface
                .names
                .get(LOGICAL_NAME_KEY)
                .cloned()
                .ok_or_else(|| NetworkingError::attribute_missing("Attributes", LOGICAL_NAME_KEY))?;
            debug!("Renaming {} to {}", iface.name, logical);
            iface.name = logical;
        }
        ctx.network.bonds = group_bonds(ctx.network.interfaces.as_slice());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::test_support::state;

    #[test]
    fn test_interfaces_renamed_to_logical_names() -> Result<()> {
        let (mut metadata, mut network) = state("BAREMETAL_HUA");
        let mut ctx = HookContext {
            metadata: &mut metadata,
            network: &mut network,
        };

        assert!(LogicalInterfaceNamesHook.on_initialized(&mut ctx)?);
        let names: Vec<_> = network.interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["eth0", "eth1"]);
        Ok(())
    }

    #[test]
    fn test_missing_logical_name_is_an_error() {
        let (mut metadata, mut network) = state("baremetal_hua");
        network.interfaces.iter_mut().for_each(|i| i.names.clear());
        let mut ctx = HookContext {
            metadata: &mut metadata,
            network: &mut network,
        };
        assert!(LogicalInterfaceNamesHook.on_initialized(&mut ctx).is_err());
    }

    #[test]
    fn test_other_plans_keep_physical_names() -> Result<()> {
        let (mut metadata, mut network) = state("c3.small.x86");
        let mut ctx = HookContext {
            metadata: &mut metadata,
            network: &mut network,
        };
        assert!(!LogicalInterfaceNamesHook.on_initialized(&mut ctx)?);
        assert_eq!(network.interfaces[0].name, "enp0");
        Ok(())
    }
}
