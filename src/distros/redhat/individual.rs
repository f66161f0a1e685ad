// file: src/distros/redhat/individual.rs
// version: 1.0.0
// guid: 2f7d9a4b-6c1e-4b58-a3e0-8d5b1f7c9e62

use super::{ifcfg_path, private_alias_tasks, IFCFG_PRIMARY, SYSCONFIG_NETWORK, SYSCONFIG_NETWORK_PATH};
use crate::distros::builder::{BuildContext, NetworkBuilder};
use crate::distros::tasks::{Task, TaskMap};
use crate::Result;
use tracing::warn;

/// Addresses configured on the first interface only
pub struct RedhatIndividualNetwork;

impl NetworkBuilder for RedhatIndividualNetwork {
    fn name(&self) -> &'static str {
        "redhat-individual"
    }

    fn build(&self, ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()> {
        if !ctx.network.bonding.is_individual() {
            return Ok(());
        }
        let Some(iface0) = ctx.network.interfaces.first() else {
            warn!("No interfaces to configure");
            return Ok(());
        };
        let device = iface0.name.as_str();

        tasks.insert(
            SYSCONFIG_NETWORK_PATH.to_string(),
            Task::template(SYSCONFIG_NETWORK).with_override("device", device),
        );
        tasks.insert(
            ifcfg_path(device),
            Task::template(IFCFG_PRIMARY)
                .with_override("device", device)
                .with_override("bonded", false),
        );
        private_alias_tasks(ctx, device, tasks);
        Ok(())
    }
}
