// file: src/provisioner.rs
// version: 1.0.0
// guid: 4e7a0c3f-8b1d-4f29-a6e5-d2c9b7f1a340

//! End-to-end pipeline: metadata in, configuration files out
//!
//! ```text
//! Metadata ── initialize(discovery) ──> NetworkData ── hooks ──┐
//!                                                              v
//!            registry.resolve(distro) ──> DistroBuilder ── build / render / apply(root)
//! ```

use crate::collections::AddressList;
use crate::distros::{ApplyReport, DistroBuilder, DistroRegistry};
use crate::error::NetworkingError;
use crate::hooks::{HookContext, HookEvent, HookRegistry};
use crate::logging::with_operation_span;
use crate::metadata::Metadata;
use crate::network::discovery::InterfaceDiscovery;
use crate::network::resolvers::{default_resolvers, system_resolvers, RESOLV_CONF_PATH};
use crate::network::NetworkData;
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Drives one configuration run for a host
pub struct Provisioner {
    metadata: Metadata,
    network: Option<NetworkData>,
    registry: DistroRegistry,
    hooks: HookRegistry,
    resolv_conf: PathBuf,
}

impl Provisioner {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            network: None,
            registry: DistroRegistry::with_defaults(),
            hooks: HookRegistry::with_defaults(),
            resolv_conf: PathBuf::from(RESOLV_CONF_PATH),
        }
    }

    pub fn with_registry(mut self, registry: DistroRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    /// Host resolver file consulted when metadata lists no resolvers
    pub fn with_resolv_conf(mut self, path: impl Into<PathBuf>) -> Self {
        self.resolv_conf = path.into();
        self
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn network(&self) -> Option<&NetworkData> {
        self.network.as_ref()
    }

    /// Override the operating system recorded in metadata
    pub fn set_operating_system(&mut self, distro: &str, version: &str) -> Result<()> {
        self.metadata.set_operating_system(distro, version)
    }

    /// Resolve interfaces against discovered NICs and run hooks
    pub fn initialize(&mut self, discovery: &dyn InterfaceDiscovery) -> Result<&NetworkData> {
        let network = with_operation_span("initialize", || -> Result<NetworkData> {
            let physical = discovery.discover()?;
            debug!("Discovered {} physical interfaces", physical.len());

            let fallback = system_resolvers(&self.resolv_conf, &default_resolvers());
            let mut network = NetworkData::load(&self.metadata, &physical, &fallback)?;

            let mut ctx = HookContext {
                metadata: &mut self.metadata,
                network: &mut network,
            };
            let handled = self.hooks.trigger(HookEvent::Initialized, &mut ctx)?;
            if !handled.is_empty() {
                info!("Hooks applied: {}", handled.join(", "));
            }

            log_selected_addresses(&network);
            Ok(network)
        })?;
        Ok(self.network.insert(network))
    }

    /// Replace resolvers; blank lists are ignored
    pub fn set_resolvers(&mut self, resolvers: Vec<String>) -> Result<()> {
        let network = self.network.as_mut().ok_or_else(not_initialized)?;
        let resolvers: Vec<String> = resolvers
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        if !resolvers.is_empty() {
            debug!("Using resolvers {}", resolvers.join(", "));
            network.resolvers = resolvers;
        }
        Ok(())
    }

    /// Builder for the metadata's distro
    pub fn distro_builder(&self) -> Result<DistroBuilder> {
        let network = self.network.as_ref().ok_or_else(not_initialized)?;
        let distro = self.metadata.operating_system()?.distro_id();
        let family = self
            .registry
            .create(&distro)
            .ok_or_else(|| NetworkingError::UnsupportedDistro { distro: distro.clone() })?;
        Ok(DistroBuilder::new(family, self.metadata.clone(), network.clone()))
    }

    /// Build, render and apply configuration beneath `root`
    pub fn run(&self, root: &Path) -> Result<ApplyReport> {
        let mut builder = self.distro_builder()?;
        let distro = self.metadata.operating_system()?.distro_id();

        let count = with_operation_span("build", || builder.build().map(|tasks| tasks.len()))?;
        info!("{} builder produced {} tasks for {}", builder.family(), count, distro);
        with_operation_span("render", || builder.render().map(|_| ()))?;
        let report = with_operation_span("apply", || builder.apply(root))?;

        if report.is_empty() {
            return Err(NetworkingError::NoTasks { distro });
        }
        info!("Configuration files written to root filesystem '{}'", root.display());
        Ok(report)
    }
}

fn not_initialized() -> NetworkingError {
    NetworkingError::config("network must be initialized before building")
}

fn log_selected_addresses(network: &NetworkData) {
    let selected: [(&str, AddressList); 3] = [
        ("ipv4pub", network.ipv4pub()),
        ("ipv4priv", network.ipv4priv()),
        ("ipv6pub", network.ipv6pub()),
    ];
    for (name, list) in selected {
        match list.first() {
            Some(addr) => info!(
                "{}: {} {} {}",
                name,
                addr.address,
                addr.gateway.as_deref().unwrap_or("-"),
                addr.netmask.as_deref().unwrap_or("-")
            ),
            None => info!("{}: disabled", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{PhysicalInterface, StaticDiscovery};
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    fn metadata(distro: &str, link_aggregation: &str, resolvers: Value) -> Metadata {
        Metadata::from_value(json!({
            "hostname": "h1",
            "plan": "c3.small.x86",
            "operating_system": {"distro": distro, "version": "10"},
            "network": {
                "bonding": {"link_aggregation": link_aggregation, "mode": 4},
                "interfaces": [
                    {"name": "eth0", "mac": "00:0c:29:51:53:a1", "bond": "bond0"},
                    {"name": "eth1", "mac": "00:0c:29:51:53:a2", "bond": "bond0"}
                ],
                "addresses": [
                    {"address": "10.99.193.3", "address_family": 4, "cidr": 31, "gateway": "10.99.193.2",
                     "netmask": "255.255.255.254", "management": true, "public": false}
                ],
                "resolvers": resolvers
            }
        }))
        .unwrap()
    }

    fn discovery() -> StaticDiscovery {
        StaticDiscovery::new(vec![
            PhysicalInterface::new("enp0", "00:0c:29:51:53:a1"),
            PhysicalInterface::new("enp1", "00:0c:29:51:53:a2"),
        ])
    }

    #[test]
    fn test_run_writes_configuration() -> Result<()> {
        // Arrange
        let root = TempDir::new()?;
        let mut provisioner = Provisioner::new(metadata("debian", "bonded", json!(["1.2.3.4"])));
        provisioner.initialize(&discovery())?;

        // Act
        let report = provisioner.run(root.path())?;

        // Assert
        assert!(!report.is_empty());
        let interfaces = fs::read_to_string(root.path().join("etc/network/interfaces"))?;
        assert!(interfaces.contains("bond-slaves enp0 enp1"));
        assert_eq!(fs::read_to_string(root.path().join("etc/resolv.conf"))?, "nameserver 1.2.3.4\n");
        Ok(())
    }

    #[test]
    fn test_building_before_initialize_is_an_error() {
        let provisioner = Provisioner::new(metadata("debian", "bonded", json!([])));
        let root = TempDir::new().unwrap();
        assert!(matches!(provisioner.run(root.path()), Err(NetworkingError::ConfigError(_))));
    }

    #[test]
    fn test_set_resolvers_requires_initialize() -> Result<()> {
        let mut provisioner = Provisioner::new(metadata("debian", "bonded", json!([])));
        assert!(provisioner.set_resolvers(vec!["8.8.8.8".into()]).is_err());

        provisioner.initialize(&discovery())?;
        provisioner.set_resolvers(vec![" ".into()])?;
        provisioner.set_resolvers(vec!["8.8.8.8".into(), "".into()])?;
        assert_eq!(provisioner.network().map(|n| n.resolvers.clone()), Some(vec!["8.8.8.8".to_string()]));
        Ok(())
    }

    #[test]
    fn test_resolvers_fall_back_to_host_resolv_conf() -> Result<()> {
        let temp = TempDir::new()?;
        let resolv_conf = temp.path().join("resolv.conf");
        fs::write(&resolv_conf, "search example.com\nnameserver 9.9.9.9\nnameserver ::1\n")?;

        let mut provisioner =
            Provisioner::new(metadata("debian", "bonded", json!([]))).with_resolv_conf(&resolv_conf);
        let network = provisioner.initialize(&discovery())?;

        assert_eq!(network.resolvers, vec!["9.9.9.9".to_string()]);
        Ok(())
    }

    #[test]
    fn test_unsupported_distro() -> Result<()> {
        let mut provisioner = Provisioner::new(metadata("unknownos", "bonded", json!(["1.2.3.4"])));
        provisioner.initialize(&discovery())?;

        let err = provisioner.distro_builder().err();

        assert!(matches!(err, Some(NetworkingError::UnsupportedDistro { ref distro }) if distro == "unknownos"));
        Ok(())
    }

    #[test]
    fn test_no_matching_builder_is_no_tasks() -> Result<()> {
        let root = TempDir::new()?;
        let mut provisioner = Provisioner::new(metadata("centos", "unknown", json!(["1.2.3.4"])));
        provisioner.initialize(&discovery())?;

        let err = provisioner.run(root.path()).unwrap_err();

        assert_eq!(err.exit_code(), 30);
        assert!(fs::read_dir(root.path())?.next().is_none());
        Ok(())
    }

    #[test]
    fn test_operating_system_override() -> Result<()> {
        let mut provisioner = Provisioner::new(metadata("debian", "bonded", json!(["1.2.3.4"])));
        provisioner.set_operating_system("CentOS", "7")?;
        provisioner.initialize(&discovery())?;

        let builder = provisioner.distro_builder()?;

        assert_eq!(builder.family(), "redhat");
        Ok(())
    }

    #[test]
    fn test_hooks_run_during_initialize() -> Result<()> {
        let mut md = metadata("debian", "individual", json!(["1.2.3.4"]));
        md.attributes_mut().set("plan", "x1.small.x86")?;
        let mut provisioner = Provisioner::new(md);

        let network = provisioner.initialize(&discovery())?;

        assert_eq!(network.interfaces.len(), 1);
        Ok(())
    }
}
