// file: src/distros/alpine/bonded.rs
// version: 1.0.0
// guid: b8f4d1a6-3e9c-4a27-95d0-6c2f8b1e4d93

use super::INTERFACES_PATH;
use crate::distros::bonding_module_task;
use crate::distros::builder::{BuildContext, NetworkBuilder};
use crate::distros::tasks::{Task, TaskMap};
use crate::Result;

const INTERFACES: &str = include_str!("templates/bonded_interfaces.j2");

pub struct AlpineBondedNetwork;

impl NetworkBuilder for AlpineBondedNetwork {
    fn name(&self) -> &'static str {
        "alpine-bonded"
    }

    fn build(&self, ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()> {
        if !ctx.network.bonding.is_bonded() {
            return Ok(());
        }
        tasks.insert(INTERFACES_PATH.to_string(), Task::template(INTERFACES));
        bonding_module_task(tasks);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distros::test_support::*;
    use crate::distros::MODULES_PATH;

    #[test]
    fn test_public_bond() -> Result<()> {
        // Arrange
        let mut builder = distro_builder(metadata("alpine", "3", "bonded", 4, public_addresses(), false))?;

        // Act
        let out = rendered(&mut builder, INTERFACES_PATH)?;

        // Assert
        let expected = "auto lo\niface lo inet loopback\n\
            \nauto bond0\niface bond0 inet static\n    address 147.75.109.163\n    netmask 255.255.255.254\n    \
            gateway 147.75.109.162\n\
            \n    use bond\n    requires eth0 eth1\n    bond-members eth0 eth1\n    bond-mode 4\n\
            \n    bond-downdelay 200\n    bond-miimon 100\n    bond-updelay 200\n    bond-xmit_hash_policy layer3+4\n\
            \n    dns-nameservers 147.75.207.207 147.75.207.208\n\
            \niface bond0 inet6 static\n    address 2604:1380:1:4200::3\n    netmask 127\n    gateway 2604:1380:1:4200::2\n\
            \nauto bond0:0\niface bond0:0 inet static\n    address 10.99.193.3\n    netmask 255.255.255.254\n    \
            post-up route add -net 10.0.0.0/8 gw 10.99.193.2\n    post-down route del -net 10.0.0.0/8 gw 10.99.193.2\n";
        assert_eq!(out, expected);
        assert_eq!(rendered(&mut builder, MODULES_PATH)?, "bonding\n");
        Ok(())
    }

    #[test]
    fn test_private_bond_skips_public_blocks() -> Result<()> {
        let mut builder = distro_builder(metadata("alpine", "3", "bonded", 1, private_addresses(), false))?;
        let out = rendered(&mut builder, INTERFACES_PATH)?;
        assert!(out.ends_with("    dns-nameservers 147.75.207.207 147.75.207.208\n"));
        assert!(!out.contains("inet6"));
        assert!(!out.contains("bond0:0"));
        Ok(())
    }
}
