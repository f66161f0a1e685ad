// file: src/network/mod.rs
// version: 2.0.0
// guid: s9t0u1v2-w3x4-5678-9012-345678stuvwx

//! Network topology resolution

pub mod bonds;
pub mod data;
pub mod discovery;
pub mod resolver;
pub mod resolvers;
pub mod types;

pub use bonds::{group_bonds, Bond, BondGroups};
pub use data::NetworkData;
pub use discovery::{InterfaceDiscovery, StaticDiscovery, SysfsDiscovery};
pub use resolver::resolve_interfaces;
pub use types::{Address, BondMode, Bonding, LogicalInterface, PhysicalInterface};
