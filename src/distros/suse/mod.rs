// file: src/distros/suse/mod.rs
// version: 1.0.0
// guid: 9d3b7f1e-2a6c-4e84-b5f9-0c8e4a2d7b16

//! SUSE: wicked `ifcfg` files and a static route table

pub mod bonded;
pub mod individual;

pub use bonded::SuseBondedNetwork;
pub use individual::SuseIndividualNetwork;

use super::builder::{BuildContext, DistroFamily, NetworkBuilder};
use super::registry::{DistroDescriptor, DistroMatch};
use super::tasks::{Task, TaskMap};
use super::{hostname_task, redhat, resolv_conf_task, HOSTS_PATH};
use crate::Result;

pub const DISTROS: &[&str] = &["opensuseproject", "suselinux", "suse", "opensuse"];

pub const NETWORK_DIR: &str = "etc/sysconfig/network";
pub const ROUTES_PATH: &str = "etc/sysconfig/network/routes";

pub(crate) const ROUTES: &str = include_str!("templates/routes.j2");
pub(crate) const IFCFG_SLAVE: &str = include_str!("templates/ifcfg_slave.j2");

pub fn descriptor() -> DistroDescriptor {
    DistroDescriptor {
        name: "suse",
        distros: DistroMatch::Ids(DISTROS),
        factory: || Box::new(SuseFamily),
    }
}

/// `ifcfg-<device>` path
pub fn ifcfg_path(device: &str) -> String {
    format!("{}/ifcfg-{}", NETWORK_DIR, device)
}

pub struct SuseFamily;

impl DistroFamily for SuseFamily {
    fn name(&self) -> &'static str {
        "suse"
    }

    fn build_tasks(&self, _ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()> {
        hostname_task(tasks);
        resolv_conf_task(tasks);
        tasks.insert(HOSTS_PATH.to_string(), Task::template(redhat::HOSTS));
        Ok(())
    }

    fn network_builders(&self) -> Vec<Box<dyn NetworkBuilder>> {
        vec![Box::new(SuseBondedNetwork), Box::new(SuseIndividualNetwork)]
    }
}
