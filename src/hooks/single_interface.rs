// file: src/hooks/single_interface.rs
// version: 1.0.0
// guid: 7c1d3e5f-9a2b-4c8d-b6e4-1f0a3c5e7d92

//! Restrict single-NIC plans to their first interface

use super::{BuilderHook, HookContext};
use crate::network::group_bonds;
use crate::Result;
use tracing::info;

/// Plans wired with a single usable NIC
pub const SINGLE_INTERFACE_PLANS: &[&str] = &["baremetal_1e", "x1.small.x86"];

pub struct SingleInterfaceHook;

impl BuilderHook for SingleInterfaceHook {
    fn name(&self) -> &'static str {
        "single_interface"
    }

    fn on_initialized(&self, ctx: &mut HookContext<'_>) -> Result<bool> {
        if !ctx.plan_in(SINGLE_INTERFACE_PLANS) {
            return Ok(false);
        }

        ctx.network.interfaces.truncate(1);
        ctx.network.bonds = group_bonds(ctx.network.interfaces.as_slice());
        info!("Plan uses a single interface; keeping only the first");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::test_support::state;

    #[test]
    fn test_single_interface_plans_keep_first_interface() -> Result<()> {
        for plan in SINGLE_INTERFACE_PLANS {
            // Arrange
            let (mut metadata, mut network) = state(plan);
            let mut ctx = HookContext {
                metadata: &mut metadata,
                network: &mut network,
            };

            // Act
            let acted = SingleInterfaceHook.on_initialized(&mut ctx)?;

            // Assert
            assert!(acted);
            assert_eq!(network.interfaces.len(), 1);
            assert_eq!(network.interfaces[0].name, "enp0");
            assert_eq!(network.bonds.members("bond0").len(), 1);
        }
        Ok(())
    }

    #[test]
    fn test_other_plans_are_untouched() -> Result<()> {
        let (mut metadata, mut network) = state("c3.small.x86");
        let mut ctx = HookContext {
            metadata: &mut metadata,
            network: &mut network,
        };
        assert!(!SingleInterfaceHook.on_initialized(&mut ctx)?);
        assert_eq!(network.interfaces.len(), 2);
        Ok(())
    }
}
