// file: src/distros/suse/bonded.rs
// version: 1.0.0
// guid: 1c5e9b3a-7d2f-4a68-8e1b-f4a0c6d2e957

use super::{ifcfg_path, IFCFG_SLAVE, ROUTES, ROUTES_PATH};
use crate::distros::builder::{BuildContext, NetworkBuilder};
use crate::distros::redhat::bonded::BONDING_CONF_PATH;
use crate::distros::redhat::BONDING_CONF;
use crate::distros::tasks::{Task, TaskMap};
use crate::Result;

const IFCFG_BOND0: &str = include_str!("templates/ifcfg_bond0.j2");

pub struct SuseBondedNetwork;

impl NetworkBuilder for SuseBondedNetwork {
    fn name(&self) -> &'static str {
        "suse-bonded"
    }

    fn build(&self, ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()> {
        if !ctx.network.bonding.is_bonded() {
            return Ok(());
        }
        tasks.insert(BONDING_CONF_PATH.to_string(), Task::template(BONDING_CONF));
        tasks.insert(ifcfg_path("bond0"), Task::template(IFCFG_BOND0));
        tasks.insert(ROUTES_PATH.to_string(), Task::template(ROUTES));
        for iface in ctx.network.interfaces.iter() {
            tasks.insert(ifcfg_path(&iface.name), Task::template(IFCFG_SLAVE));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distros::test_support::*;

    #[test]
    fn test_public_bond() -> Result<()> {
        // Arrange
        let mut builder = distro_builder(metadata("opensuseproject", "15", "bonded", 4, public_addresses(), false))?;

        // Act
        let out = rendered(&mut builder, &ifcfg_path("bond0"))?;

        // Assert
        assert_eq!(
            out,
            "STARTMODE='onboot'\nBOOTPROTO='static'\nIPADDR='147.75.109.163/31'\nBONDING_MASTER='yes'\n\
             BONDING_SLAVE_0='enp0'\nBONDING_SLAVE_1='enp1'\nBONDING_MODULE_OPTS='mode=4 miimon=100'\n\
             IPADDR1='10.99.193.3'\nNETMASK1='255.255.255.254'\nGATEWAY1='10.99.193.2'\nLABEL1='0'\n\
             IPADDR2='2604:1380:1:4200::3/127'\nGATEWAY2='2604:1380:1:4200::2'\nLABEL2='1'\n"
        );
        assert_eq!(
            rendered(&mut builder, &ifcfg_path("enp1"))?,
            "STARTMODE='hotplug'\nBOOTPROTO='none'\n"
        );
        assert!(builder.build()?.contains_key(BONDING_CONF_PATH));
        Ok(())
    }

    #[test]
    fn test_private_bond() -> Result<()> {
        let mut builder = distro_builder(metadata("suse", "15", "mlag_ha", 1, private_addresses(), false))?;
        assert_eq!(
            rendered(&mut builder, &ifcfg_path("bond0"))?,
            "STARTMODE='onboot'\nBOOTPROTO='static'\nIPADDR='10.99.193.3/31'\nBONDING_MASTER='yes'\n\
             BONDING_SLAVE_0='enp0'\nBONDING_SLAVE_1='enp1'\nBONDING_MODULE_OPTS='mode=1 miimon=100'\n"
        );
        Ok(())
    }
}
