// file: src/distros/alpine/mod.rs
// version: 1.0.0
// guid: 7a2e5c9f-4d1b-4f06-8b3a-e9c6d0f4a271

//! Alpine: ifupdown-ng `interfaces` plus mdev renaming
//!
//! mdev renames each NIC back to its metadata name at boot, so every
//! Alpine template addresses interfaces by `meta_name`.

pub mod bonded;
pub mod individual;

pub use bonded::AlpineBondedNetwork;
pub use individual::AlpineIndividualNetwork;

use super::builder::{BuildContext, DistroFamily, NetworkBuilder};
use super::registry::{DistroDescriptor, DistroMatch};
use super::tasks::{Task, TaskMap};
use super::{hostname_task, persistent_names, resolv_conf_task, HOSTS_PATH};
use crate::Result;

pub const DISTROS: &[&str] = &["alpine"];

pub const INTERFACES_PATH: &str = "etc/network/interfaces";

const HOSTS: &str = include_str!("templates/hosts.j2");

pub fn descriptor() -> DistroDescriptor {
    DistroDescriptor {
        name: "alpine",
        distros: DistroMatch::Ids(DISTROS),
        factory: || Box::new(AlpineFamily),
    }
}

pub struct AlpineFamily;

impl DistroFamily for AlpineFamily {
    fn name(&self) -> &'static str {
        "alpine"
    }

    fn build_tasks(&self, _ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()> {
        hostname_task(tasks);
        resolv_conf_task(tasks);
        tasks.insert(HOSTS_PATH.to_string(), Task::template(HOSTS));
        persistent_names::mdev_tasks(tasks);
        Ok(())
    }

    fn network_builders(&self) -> Vec<Box<dyn NetworkBuilder>> {
        vec![Box::new(AlpineBondedNetwork), Box::new(AlpineIndividualNetwork)]
    }
}
