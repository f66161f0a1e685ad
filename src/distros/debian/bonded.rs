// file: src/distros/debian/bonded.rs
// version: 1.0.0
// guid: a3d6f9c2-8e1b-4f75-9c4a-2b7e0d5f8a36

use super::INTERFACES_PATH;
use crate::distros::builder::{BuildContext, NetworkBuilder};
use crate::distros::bonding_module_task;
use crate::distros::tasks::{Task, TaskMap};
use crate::Result;

const INTERFACES: &str = include_str!("templates/bonded_interfaces.j2");

/// `bond0` over every resolved interface
pub struct DebianBondedNetwork;

impl NetworkBuilder for DebianBondedNetwork {
    fn name(&self) -> &'static str {
        "debian-bonded"
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
