// file: src/network/discovery.rs
// version: 1.0.0
// guid: 3e8c1f24-7a5b-4d9e-b1c0-8f2a6d4e7c13

//! Physical interface discovery
//!
//! Discovery is a collaborator of the resolver: it only has to produce the
//! `{name, mac, driver}` records present on the host. [`SysfsDiscovery`] reads
//! them from `/sys/class/net`; [`StaticDiscovery`] serves a fixed list for
//! tests and offline rendering.

use crate::error::NetworkingError;
use crate::network::types::PhysicalInterface;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default sysfs network class directory
pub const SYSFS_NET_PATH: &str = "/sys/class/net";

/// Drivers that never back a real NIC
pub const IGNORED_DRIVERS: &[&str] = &["bridge", "veth", "virtio-pci"];

/// Source of physical interfaces
pub trait InterfaceDiscovery {
    fn discover(&self) -> Result<Vec<PhysicalInterface>>;
}

/// Enumerates NICs from a sysfs `class/net` directory
#[derive(Debug, Clone)]
pub struct SysfsDiscovery {
    root: PathBuf,
}

impl Default for SysfsDiscovery {
    fn default() -> Self {
        Self::new(SYSFS_NET_PATH)
    }
}

impl SysfsDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_device(&self, dir: &Path, name: &str) -> Result<Option<PhysicalInterface>> {
        // Virtual devices have no device/driver link
        let driver = match fs::read_link(dir.join("device").join("driver")) {
            Ok(target) => match target.file_name() {
                Some(base) => base.to_string_lossy().into_owned(),
                None => return Ok(None),
            },
            Err(_) => return Ok(None),
        };

        let address_path = dir.join("address");
        let mac = fs::read_to_string(&address_path)
            .map_err(|e| NetworkingError::filesystem(&address_path, e))?
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        debug!("name={} driver={}", name, driver);
        if IGNORED_DRIVERS.contains(&driver.as_str()) {
            return Ok(None);
        }

        Ok(Some(
            PhysicalInterface::new(name, mac)
                .with_driver(driver)
                .with_name("LOGICAL", name),
        ))
    }
}

impl InterfaceDiscovery for SysfsDiscovery {
    fn discover(&self) -> Result<Vec<PhysicalInterface>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            NetworkingError::DiscoveryError(format!(
                "cannot list {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| NetworkingError::filesystem(&self.root, e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        let mut nics = Vec::new();
        for name in names {
            if let Some(nic) = self.read_device(&self.root.join(&name), &name)? {
                nics.push(nic);
            }
        }
        Ok(nics)
    }
}

/// Fixed interface list
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    interfaces: Vec<PhysicalInterface>,
}

impl StaticDiscovery {
    pub fn new(interfaces: Vec<PhysicalInterface>) -> Self {
        Self { interfaces }
    }
}

impl InterfaceDiscovery for StaticDiscovery {
    fn discover(&self) -> Result<Vec<PhysicalInterface>> {
        Ok(self.interfaces.clone())
    }
}
