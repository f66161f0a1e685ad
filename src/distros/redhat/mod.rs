// file: src/distros/redhat/mod.rs
// version: 1.0.0
// guid: 4c8a1e6f-0b3d-4a7e-92c5-e7f1b9d3a058

//! RHEL derivatives: initscripts `ifcfg` files

pub mod bonded;
pub mod individual;

pub use bonded::RedhatBondedNetwork;
pub use individual::RedhatIndividualNetwork;

use super::builder::{BuildContext, DistroFamily, NetworkBuilder};
use super::registry::{DistroDescriptor, DistroMatch};
use super::tasks::{Task, TaskMap};
use super::{hostname_task, persistent_names, resolv_conf_task, HOSTS_PATH};
use crate::Result;

pub const DISTROS: &[&str] = &[
    "centos",
    "redhatenterpriseserver",
    "redhatenterprise",
    "scientificcernslc",
    "fedora",
    "rocky",
    "almalinux",
];

/// Distros that keep NetworkManager and pin names with udev instead
pub const UDEV_NAMED_DISTROS: &[&str] = &["scientificcernslc", "redhatenterpriseserver", "redhatenterprise"];

/// NetworkManager units removed so initscripts own the interfaces
pub const NETWORK_MANAGER_UNITS: &[&str] = &[
    "dbus-org.freedesktop.NetworkManager",
    "dbus-org.freedesktop.nm-dispatcher",
    "multi-user.target.wants/NetworkManager",
];

pub const SYSCONFIG_NETWORK_PATH: &str = "etc/sysconfig/network";
pub const NETWORK_SCRIPTS_DIR: &str = "etc/sysconfig/network-scripts";

pub(crate) const HOSTS: &str = include_str!("templates/hosts.j2");
pub(crate) const SYSCONFIG_NETWORK: &str = include_str!("templates/sysconfig_network.j2");
pub(crate) const BONDING_CONF: &str = include_str!("templates/bonding.conf.j2");
pub(crate) const IFCFG_PRIMARY: &str = include_str!("templates/ifcfg_primary.j2");
pub(crate) const IFCFG_ALIAS: &str = include_str!("templates/ifcfg_alias.j2");
pub(crate) const ROUTE: &str = include_str!("templates/route.j2");

pub fn descriptor() -> DistroDescriptor {
    DistroDescriptor {
        name: "redhat",
        distros: DistroMatch::Ids(DISTROS),
        factory: || Box::new(RedhatFamily),
    }
}

/// `ifcfg-<device>` path
pub fn ifcfg_path(device: &str) -> String {
    format!("{}/ifcfg-{}", NETWORK_SCRIPTS_DIR, device)
}

/// `route-<device>` path
pub fn route_path(device: &str) -> String {
    format!("{}/route-{}", NETWORK_SCRIPTS_DIR, device)
}

/// Alias carrying the private address plus its routes, for public hosts only
pub(crate) fn private_alias_tasks(ctx: &BuildContext<'_>, device: &str, tasks: &mut TaskMap) {
    if ctx.network.ipv4pub().is_empty() {
        return;
    }
    tasks.insert(
        ifcfg_path(&format!("{}:0", device)),
        Task::template(IFCFG_ALIAS).with_override("device", device),
    );
    tasks.insert(route_path(device), Task::template(ROUTE).with_override("device", device));
}

pub struct RedhatFamily;

impl DistroFamily for RedhatFamily {
    fn name(&self) -> &'static str {
        "redhat"
    }

    fn build_tasks(&self, ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()> {
        hostname_task(tasks);
        tasks.insert(HOSTS_PATH.to_string(), Task::template(HOSTS));
        resolv_conf_task(tasks);

        let distro = ctx.distro();
        if UDEV_NAMED_DISTROS.contains(&distro.as_str()) {
            persistent_names::udev_tasks(tasks);
        } else {
            for unit in NETWORK_MANAGER_UNITS {
                tasks.insert(format!("etc/systemd/system/{}.service", unit), Task::delete());
            }
        }
        Ok(())
    }

    fn network_builders(&self) -> Vec<Box<dyn NetworkBuilder>> {
        vec![Box::new(RedhatBondedNetwork), Box::new(RedhatIndividualNetwork)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distros::persistent_names::UDEV_RULES_PATH;
    use crate::distros::test_support::*;
    use crate::distros::Rendered;

    #[test]
    fn test_network_manager_units_are_removed() -> Result<()> {
        // Arrange
        let mut builder = distro_builder(metadata("centos", "7", "bonded", 4, public_addresses(), false))?;

        // Act
        let rendered = builder.render()?;

        // Assert
        for unit in NETWORK_MANAGER_UNITS {
            let path = format!("etc/systemd/system/{unit}.service");
            assert_eq!(rendered[path.as_str()].output, Rendered::Delete);
        }
        assert!(!rendered.contains_key(UDEV_RULES_PATH));
        assert_eq!(
            rendered[HOSTS_PATH].content(),
            Some(
                "127.0.0.1   localhost localhost.localdomain localhost4 localhost4.localdomain4\n\
                 ::1         localhost localhost.localdomain localhost6 localhost6.localdomain6\n"
            )
        );
        Ok(())
    }

    #[test]
    fn test_rhel_keeps_network_manager_and_pins_names() -> Result<()> {
        for distro in UDEV_NAMED_DISTROS {
            let mut builder = distro_builder(metadata(distro, "8", "individual", 0, public_addresses(), false))?;
            let tasks = builder.build()?;
            assert!(tasks.contains_key(UDEV_RULES_PATH), "{distro}");
            assert!(tasks.keys().all(|k| !k.starts_with("etc/systemd/system")), "{distro}");
        }
        Ok(())
    }

    #[test]
    fn test_paths() {
        assert_eq!(ifcfg_path("bond0:0"), "etc/sysconfig/network-scripts/ifcfg-bond0:0");
        assert_eq!(route_path("enp0"), "etc/sysconfig/network-scripts/route-enp0");
    }
}
