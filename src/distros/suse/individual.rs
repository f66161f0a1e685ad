// file: src/distros/suse/individual.rs
// version: 1.0.0
// guid: 6f1a8c4e-0b9d-4c37-a2e6-d3b7f5a9c108

use super::{ifcfg_path, IFCFG_SLAVE, ROUTES, ROUTES_PATH};
use crate::distros::builder::{BuildContext, NetworkBuilder};
use crate::distros::tasks::{Task, TaskMap};
use crate::Result;
use tracing::warn;

const IFCFG_IFACE0: &str = include_str!("templates/ifcfg_iface0.j2");

/// First interface carries the addresses; the rest come up unconfigured
pub struct SuseIndividualNetwork;

impl NetworkBuilder for SuseIndividualNetwork {
    fn name(&self) -> &'static str {
        "suse-individual"
    }

    fn build(&self, ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()> {
        if !ctx.network.bonding.is_individual() {
            return Ok(());
        }
        let Some((iface0, rest)) = ctx.network.interfaces.as_slice().split_first() else {
            warn!("No interfaces to configure");
            return Ok(());
        };

        tasks.insert(ifcfg_path(&iface0.name), Task::template(IFCFG_IFACE0));
        tasks.insert(ROUTES_PATH.to_string(), Task::template(ROUTES));
        for iface in rest {
            tasks.insert(ifcfg_path(&iface.name), Task::template(IFCFG_SLAVE));
        }
        Ok(())
    }
}
