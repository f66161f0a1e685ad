// file: src/distros/alpine/individual.rs
// version: 1.0.0
// guid: 0e6c2a8d-9f4b-4d15-a7e3-5b1d9c3f6a82

use super::INTERFACES_PATH;
use crate::distros::builder::{BuildContext, NetworkBuilder};
use crate::distros::tasks::{Task, TaskMap};
use crate::distros::RESOLV_CONF_PATH;
use crate::Result;

const INTERFACES: &str = include_str!("templates/individual_interfaces.j2");
const DHCP_INTERFACES: &str = include_str!("templates/dhcp_interfaces.j2");

pub struct AlpineIndividualNetwork;

impl NetworkBuilder for AlpineIndividualNetwork {
    fn name(&self) -> &'static str {
        "alpine-individual"
    }

    fn build(&self, ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()> {
        if !ctx.network.bonding.is_individual() {
            return Ok(());
        }
        if ctx.network.dhcp() {
            tasks.insert(INTERFACES_PATH.to_string(), Task::template(DHCP_INTERFACES));
            // udhcpc writes resolv.conf from the lease
            tasks.insert(RESOLV_CONF_PATH.to_string(), Task::delete());
        } else {
            tasks.insert(INTERFACES_PATH.to_string(), Task::template(INTERFACES));
        }
        Ok(())
    }
}
