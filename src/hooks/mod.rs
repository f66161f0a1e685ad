// file: src/hooks/mod.rs
// version: 1.0.0
// guid: 2a9e4c7b-5d1f-4b36-8e0a-c3f7d9b1e542

//! Plan-specific adjustments applied to the network model
//!
//! Some hardware plans need the resolved network model patched before any
//! configuration is generated. Each [`BuilderHook`] decides from the metadata
//! whether it applies; hooks that do not care about an event do nothing.

pub mod logical_names;
pub mod single_interface;

pub use logical_names::LogicalInterfaceNamesHook;
pub use single_interface::SingleInterfaceHook;

use crate::metadata::Metadata;
use crate::network::NetworkData;
use crate::Result;
use tracing::debug;

/// Pipeline events hooks can react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// Network data has been loaded and interfaces resolved
    Initialized,
}

impl HookEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
        }
    }
}

/// Mutable view of the state a hook may patch
pub struct HookContext<'a> {
    pub metadata: &'a mut Metadata,
    pub network: &'a mut NetworkData,
}

impl HookContext<'_> {
    /// Plan slug, lowercased; `None` when metadata has no plan
    pub fn plan(&self) -> Option<String> {
        self.metadata
            .get("plan")
            .and_then(|p| p.as_str().map(str::to_lowercase))
    }

    /// Whether the plan is one of `plans`
    pub fn plan_in(&self, plans: &[&str]) -> bool {
        self.plan()
            .map(|plan| plans.iter().any(|p| p.eq_ignore_ascii_case(&plan)))
            .unwrap_or(false)
    }
}

/// Metadata adjustment reacting to pipeline events
pub trait BuilderHook: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called once network data is loaded; returns whether the hook acted
    fn on_initialized(&self, _ctx: &mut HookContext<'_>) -> Result<bool> {
        Ok(false)
    }
}

/// Ordered set of hooks
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn BuilderHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in hook
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SingleInterfaceHook));
        registry.register(Box::new(LogicalInterfaceNamesHook));
        registry
    }

    pub fn register(&mut self, hook: Box<dyn BuilderHook>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook for `event`, returning the names of those that acted
    pub fn trigger(&self, event: HookEvent, ctx: &mut HookContext<'_>) -> Result<Vec<&'static str>> {
        let mut handled = Vec::new();
        for hook in &self.hooks {
            let acted = match event {
                HookEvent::Initialized => hook.on_initialized(ctx)?,
            };
            if acted {
                debug!("Hook {} handled {}", hook.name(), event.name());
                handled.push(hook.name());
            }
        }
        Ok(handled)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::metadata::Metadata;
    use crate::network::{NetworkData, PhysicalInterface};
    use serde_json::json;

    pub fn state(plan: &str) -> (Metadata, NetworkData) {
        let metadata = Metadata::from_value(json!({
            "hostname": "h1",
            "plan": plan,
            "network": {
                "bonding": {"link_aggregation": "individual"},
                "interfaces": [
                    {"name": "eth0", "mac": "00:0c:29:51:53:a1", "bond": "bond0"},
                    {"name": "eth1", "mac": "00:0c:29:51:53:a2", "bond": "bond0"}
                ],
                "addresses": []
            }
        }))
        .unwrap();
        let physical = vec![
            PhysicalInterface::new("enp0", "00:0c:29:51:53:a1").with_name("LOGICAL", "eth0"),
            PhysicalInterface::new("enp1", "00:0c:29:51:53:a2").with_name("LOGICAL", "eth1"),
        ];
        let network = NetworkData::load(&metadata, &physical, &[]).unwrap();
        (metadata, network)
    }
}
