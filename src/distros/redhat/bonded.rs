// file: src/distros/redhat/bonded.rs
// version: 1.0.0
// guid: 6e0b3f8d-5a2c-4e91-b7d4-c1a9e6f2b385

use super::{
    ifcfg_path, private_alias_tasks, BONDING_CONF, IFCFG_PRIMARY, SYSCONFIG_NETWORK, SYSCONFIG_NETWORK_PATH,
};
use crate::distros::builder::{BuildContext, NetworkBuilder};
use crate::distros::tasks::{Task, TaskMap};
use crate::Result;

pub const BOND: &str = "bond0";
pub const BONDING_CONF_PATH: &str = "etc/modprobe.d/bonding.conf";
pub const IFUP_PRE_LOCAL_PATH: &str = "sbin/ifup-pre-local";

const IFCFG_SLAVE: &str = include_str!("templates/ifcfg_slave.j2");
const IFUP_PRE_LOCAL: &str = include_str!("templates/ifup_pre_local.j2");

pub struct RedhatBondedNetwork;

impl NetworkBuilder for RedhatBondedNetwork {
    fn name(&self) -> &'static str {
        "redhat-bonded"
    }

    fn build(&self, ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()> {
        if !ctx.network.bonding.is_bonded() {
            return Ok(());
        }

        tasks.insert(
            SYSCONFIG_NETWORK_PATH.to_string(),
            Task::template(SYSCONFIG_NETWORK).with_override("device", BOND),
        );
        tasks.insert(BONDING_CONF_PATH.to_string(), Task::template(BONDING_CONF));
        tasks.insert(
            ifcfg_path(BOND),
            Task::template(IFCFG_PRIMARY)
                .with_override("device", BOND)
                .with_override("bonded", true),
        );
        private_alias_tasks(ctx, BOND, tasks);

        for iface in ctx.network.interfaces.iter() {
            tasks.insert(
                ifcfg_path(&iface.name),
                Task::template(IFCFG_SLAVE).with_override("iface", serde_json::to_value(iface)?),
            );
        }

        // Slaves need their MAC set before enslaving
        tasks.insert(
            IFUP_PRE_LOCAL_PATH.to_string(),
            Task::template(IFUP_PRE_LOCAL).with_mode(0o755),
        );
        Ok(())
    }
}
