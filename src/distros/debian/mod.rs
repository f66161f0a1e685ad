// file: src/distros/debian/mod.rs
// version: 1.0.0
// guid: 5b9f2e7c-3a1d-4c64-8f0e-a6d2b8c4e173

//! Debian and Ubuntu: ifupdown `interfaces` files

pub mod bonded;
pub mod individual;

pub use bonded::DebianBondedNetwork;
pub use individual::DebianIndividualNetwork;

use super::builder::{BuildContext, DistroFamily, NetworkBuilder};
use super::registry::{DistroDescriptor, DistroMatch};
use super::tasks::{Task, TaskMap};
use super::{hostname_task, persistent_names, resolv_conf_task, HOSTS_PATH};
use crate::Result;
use tracing::debug;

pub const DISTROS: &[&str] = &["debian", "ubuntu"];

pub const INTERFACES_PATH: &str = "etc/network/interfaces";
pub const RESOLVED_CONF_PATH: &str = "etc/systemd/resolved.conf";

const HOSTS: &str = include_str!("templates/hosts.j2");
const RESOLVED_CONF: &str = include_str!("templates/resolved.conf.j2");

pub fn descriptor() -> DistroDescriptor {
    DistroDescriptor {
        name: "debian",
        distros: DistroMatch::Ids(DISTROS),
        factory: || Box::new(DebianFamily),
    }
}

pub struct DebianFamily;

impl DistroFamily for DebianFamily {
    fn name(&self) -> &'static str {
        "debian"
    }

    fn build_tasks(&self, ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()> {
        hostname_task(tasks);
        tasks.insert(HOSTS_PATH.to_string(), Task::template(HOSTS));

        // systemd-resolved owns resolv.conf on newer Ubuntu
        if ctx.is_at_least("ubuntu", "18.04") {
            tasks.insert(RESOLVED_CONF_PATH.to_string(), Task::template(RESOLVED_CONF));
        } else {
            resolv_conf_task(tasks);
        }

        if ctx.is_at_least("debian", "12") {
            debug!("Debian {} names interfaces predictably, skipping udev rules", ctx.version());
        } else {
            persistent_names::udev_tasks(tasks);
        }
        Ok(())
    }

    fn network_builders(&self) -> Vec<Box<dyn NetworkBuilder>> {
        vec![Box::new(DebianBondedNetwork), Box::new(DebianIndividualNetwork)]
    }
}
