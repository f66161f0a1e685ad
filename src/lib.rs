// file: src/lib.rs
// version: 3.0.0
// guid: d82472d1-7f0f-4eb4-b0a3-6e1547103eb4

//! # provision-networking
//!
//! Generates operating-system network configuration for a freshly installed
//! bare-metal host. Provisioning metadata describes interfaces, bonding and
//! addresses; the matching distro family renders the files (interfaces,
//! ifcfg, hosts, resolv.conf, udev rules) beneath a target root filesystem.

pub mod cli;
pub mod collections;
pub mod config;
pub mod distros;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod metadata;
pub mod network;
pub mod provisioner;
pub mod utils;

pub use error::{NetworkingError, Result};
pub use provisioner::Provisioner;

/// Version information for the utility
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information
pub const BUILD_INFO: &str = concat!(
    "Version: ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Package: ",
    env!("CARGO_PKG_NAME"),
    "\n",
    "Families: alpine, debian, redhat, suse",
    "\n"
);
