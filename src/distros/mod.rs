// file: src/distros/mod.rs
// version: 1.0.0
// guid: 8e2d5c1a-7f4b-4a96-b3e0-1d9c6f2a8b47

//! Distro families and the task engine that renders their configuration
//!
//! Each family knows the file layout of a group of distributions. The
//! [`registry::DistroRegistry`] picks a family from the distro identifier and
//! the [`builder::DistroBuilder`] drives it through build, render and apply.

pub mod alpine;
pub mod builder;
pub mod debian;
pub mod persistent_names;
pub mod redhat;
pub mod registry;
pub mod suse;
pub mod tasks;
pub mod template;

pub use builder::{BuildContext, BuildState, DistroBuilder, DistroFamily, NetworkBuilder};
pub use registry::{DistroDescriptor, DistroMatch, DistroRegistry};
pub use tasks::{ApplyReport, Rendered, RenderedTask, RenderedTasks, Task, TaskMap, WriteMode};
pub use template::{generated_header, TemplateRenderer};

pub const HOSTNAME_PATH: &str = "etc/hostname";
pub const HOSTS_PATH: &str = "etc/hosts";
pub const RESOLV_CONF_PATH: &str = "etc/resolv.conf";
pub const MODULES_PATH: &str = "etc/modules";

const HOSTNAME: &str = include_str!("templates/hostname.j2");
const RESOLV_CONF: &str = include_str!("templates/resolv.conf.j2");

/// `etc/hostname` task
pub(crate) fn hostname_task(tasks: &mut TaskMap) {
    tasks.insert(HOSTNAME_PATH.to_string(), Task::template(HOSTNAME));
}

/// Classic `etc/resolv.conf` task
pub(crate) fn resolv_conf_task(tasks: &mut TaskMap) {
    tasks.insert(RESOLV_CONF_PATH.to_string(), Task::template(RESOLV_CONF));
}

/// Load the bonding module at boot
pub(crate) fn bonding_module_task(tasks: &mut TaskMap) {
    tasks.insert(MODULES_PATH.to_string(), Task::template("bonding\n").append());
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Metadata fixtures shared by the family tests

    use super::builder::DistroBuilder;
    use super::registry::DistroRegistry;
    use crate::metadata::Metadata;
    use crate::network::{NetworkData, PhysicalInterface};
    use crate::Result;
    use serde_json::{json, Value};

    pub const MAC0: &str = "00:0c:29:51:53:a1";
    pub const MAC1: &str = "00:0c:29:51:53:a2";
    pub const RESOLVERS: &[&str] = &["147.75.207.207", "147.75.207.208"];

    pub fn public_addresses() -> Value {
        json!([
            {"address": "147.75.109.163", "address_family": 4, "cidr": 31, "gateway": "147.75.109.162",
             "netmask": "255.255.255.254", "network": "147.75.109.162", "management": true, "public": true},
            {"address": "2604:1380:1:4200::3", "address_family": 6, "cidr": 127, "gateway": "2604:1380:1:4200::2",
             "netmask": "ffff:ffff:ffff:ffff:ffff:ffff:ffff:fffe", "network": "2604:1380:1:4200::2",
             "management": true, "public": true},
            {"address": "10.99.193.3", "address_family": 4, "cidr": 31, "gateway": "10.99.193.2",
             "netmask": "255.255.255.254", "network": "10.99.193.2", "management": true, "public": false}
        ])
    }

    pub fn private_addresses() -> Value {
        json!([
            {"address": "10.99.193.3", "address_family": 4, "cidr": 31, "gateway": "10.99.193.2",
             "netmask": "255.255.255.254", "network": "10.99.193.2", "management": true, "public": false}
        ])
    }

    pub fn metadata(
        distro: &str,
        version: &str,
        link_aggregation: &str,
        mode: u64,
        addresses: Value,
        dhcp: bool,
    ) -> Metadata {
        let mut interfaces = vec![
            json!({"name": "eth0", "mac": MAC0, "bond": "bond0"}),
            json!({"name": "eth1", "mac": MAC1, "bond": "bond0"}),
        ];
        if dhcp {
            interfaces.iter_mut().for_each(|i| i["dhcp"] = json!(true));
        }
        Metadata::from_value(json!({
            "hostname": "h1",
            "plan": "c3.small.x86",
            "operating_system": {"distro": distro, "version": version},
            "network": {
                "bonding": {"link_aggregation": link_aggregation, "mode": mode},
                "interfaces": interfaces,
                "addresses": addresses,
                "resolvers": RESOLVERS
            }
        }))
        .unwrap()
    }

    pub fn physical() -> Vec<PhysicalInterface> {
        vec![
            PhysicalInterface::new("enp0", MAC0).with_driver("ixgbe"),
            PhysicalInterface::new("enp1", MAC1).with_driver("ixgbe"),
        ]
    }

    /// Builder for `metadata`, resolved against [`physical`]
    pub fn distro_builder(metadata: Metadata) -> Result<DistroBuilder> {
        let network = NetworkData::load(&metadata, &physical(), &[])?;
        let distro = metadata.operating_system()?.distro_id();
        let family = DistroRegistry::with_defaults()
            .create(&distro)
            .expect("distro is registered");
        Ok(DistroBuilder::new(family, metadata, network))
    }

    /// Render and return `path`
    pub fn rendered(builder: &mut DistroBuilder, path: &str) -> Result<String> {
        let rendered = builder.render()?;
        Ok(rendered
            .get(path)
            .and_then(|t| t.content())
            .unwrap_or_else(|| panic!("{path} was not rendered"))
            .to_string())
    }
}
