// file: src/distros/registry.rs
// version: 1.0.0
// guid: 3f8c1a6e-9d2b-4b70-a5e3-7c0d9f2b4e18

//! Maps distro identifiers to the family that configures them

use super::builder::DistroFamily;
use super::{alpine, debian, redhat, suse};
use tracing::{debug, warn};

/// Which distro identifiers a family claims
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistroMatch {
    Ids(&'static [&'static str]),
    /// Fallback for identifiers no family claims explicitly
    Wildcard,
}

impl DistroMatch {
    fn claims(&self, distro: &str) -> bool {
        match self {
            Self::Ids(ids) => ids.iter().any(|id| id.eq_ignore_ascii_case(distro)),
            Self::Wildcard => false,
        }
    }
}

/// Registered distro family
pub struct DistroDescriptor {
    pub name: &'static str,
    pub distros: DistroMatch,
    pub factory: fn() -> Box<dyn DistroFamily>,
}

impl DistroDescriptor {
    pub fn create(&self) -> Box<dyn DistroFamily> {
        (self.factory)()
    }
}

impl std::fmt::Debug for DistroDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistroDescriptor")
            .field("name", &self.name)
            .field("distros", &self.distros)
            .finish()
    }
}

/// Ordered set of distro families
#[derive(Debug, Default)]
pub struct DistroRegistry {
    entries: Vec<DistroDescriptor>,
}

impl DistroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in family
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(alpine::descriptor());
        registry.register(debian::descriptor());
        registry.register(redhat::descriptor());
        registry.register(suse::descriptor());
        registry
    }

    /// Add a family; identifiers already claimed stay with the earlier family
    pub fn register(&mut self, descriptor: DistroDescriptor) {
        match descriptor.distros {
            DistroMatch::Ids(ids) => {
                for id in ids {
                    if let Some(existing) = self.entries.iter().find(|e| e.distros.claims(id)) {
                        warn!(
                            "Distro '{}' claimed by both {} and {}; keeping {}",
                            id, existing.name, descriptor.name, existing.name
                        );
                    }
                }
            }
            DistroMatch::Wildcard => {
                if let Some(existing) = self.entries.iter().find(|e| e.distros == DistroMatch::Wildcard) {
                    warn!(
                        "Fallback family already registered as {}; ignoring {} as fallback",
                        existing.name, descriptor.name
                    );
                }
            }
        }
        self.entries.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Family for `distro`: an explicit claim first, then the fallback
    pub fn resolve(&self, distro: &str) -> Option<&DistroDescriptor> {
        let found = self
            .entries
            .iter()
            .find(|e| e.distros.claims(distro))
            .or_else(|| self.entries.iter().find(|e| e.distros == DistroMatch::Wildcard));
        match found {
            Some(entry) => debug!("Distro '{}' handled by {}", distro, entry.name),
            None => debug!("No family handles distro '{}'", distro),
        }
        found
    }

    pub fn create(&self, distro: &str) -> Option<Box<dyn DistroFamily>> {
        self.resolve(distro).map(DistroDescriptor::create)
    }
}
