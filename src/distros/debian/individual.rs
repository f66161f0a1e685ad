// file: src/distros/debian/individual.rs
// version: 1.0.0
// guid: d7e1b4a9-2c6f-4d83-a05b-9f3c7e1d6b24

use super::INTERFACES_PATH;
use crate::distros::builder::{BuildContext, NetworkBuilder};
use crate::distros::tasks::{Task, TaskMap};
use crate::Result;
use tracing::debug;

const INTERFACES: &str = include_str!("templates/individual_interfaces.j2");
const DHCP_INTERFACES: &str = include_str!("templates/dhcp_interfaces.j2");

/// Static addressing on the first interface, or DHCP on all of them
pub struct DebianIndividualNetwork;

impl NetworkBuilder for DebianIndividualNetwork {
    fn name(&self) -> &'static str {
        "debian-individual"
    }

    fn build(&self, ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()> {
        if !ctx.network.bonding.is_individual() {
            return Ok(());
        }
        let template = if ctx.network.dhcp() {
            debug!("Every interface requested DHCP");
            DHCP_INTERFACES
        } else {
            INTERFACES
        };
        tasks.insert(INTERFACES_PATH.to_string(), Task::template(template));
        Ok(())
    }
}
