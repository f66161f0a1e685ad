// file: src/distros/builder.rs
// version: 1.0.0
// guid: 9b3e7d1c-6a2f-4c58-8e0b-d4f1a7c3e926

//! Distro builder: collects tasks, renders them and applies the result
//!
//! A [`DistroFamily`] contributes family-wide tasks and a list of
//! [`NetworkBuilder`]s, each of which decides from the network model whether
//! it applies. Tasks from network builders are layered over the family tasks
//! in order, so a later builder wins when two claim the same path.

use super::tasks::{apply_tasks, render_tasks, ApplyReport, RenderedTasks, TaskMap};
use super::template::TemplateRenderer;
use crate::error::NetworkingError;
use crate::metadata::{Metadata, OperatingSystem};
use crate::network::NetworkData;
use crate::utils::version_at_least;
use crate::Result;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

/// Read-only state visible to builders while they produce tasks
pub struct BuildContext<'a> {
    pub metadata: &'a Metadata,
    pub network: &'a NetworkData,
    pub os: OperatingSystem,
}

impl<'a> BuildContext<'a> {
    pub fn new(metadata: &'a Metadata, network: &'a NetworkData) -> Result<Self> {
        Ok(Self {
            metadata,
            network,
            os: metadata.operating_system()?,
        })
    }

    pub fn distro(&self) -> String {
        self.os.distro_id()
    }

    pub fn version(&self) -> &str {
        self.os.version_str()
    }

    /// Whether the distro is `distro` at `minimum` or newer
    pub fn is_at_least(&self, distro: &str, minimum: &str) -> bool {
        self.distro() == distro && version_at_least(self.version(), minimum)
    }
}

/// Produces the tasks for one network layout, e.g. bonded
pub trait NetworkBuilder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Add this builder's tasks; builders that do not apply add nothing
    fn build(&self, ctx: &BuildContext<'_>, tasks: &mut TaskMap) -> Result<()>;
}

/// A family of related distributions sharing file layouts
pub trait DistroFamily: Send + Sync {
    fn name(&self) -> &'static str;

    /// Tasks common to every network layout of the family
    fn build_tasks(&self, _ctx: &BuildContext<'_>, _tasks: &mut TaskMap) -> Result<()> {
        Ok(())
    }

    fn network_builders(&self) -> Vec<Box<dyn NetworkBuilder>>;
}

/// Lifecycle of a [`DistroBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Unbuilt,
    Built,
    Rendered,
    Applied,
}

/// Turns the network model into files for one distro family
pub struct DistroBuilder {
    family: Box<dyn DistroFamily>,
    metadata: Metadata,
    network: NetworkData,
    renderer: TemplateRenderer,
    state: BuildState,
    tasks: Option<TaskMap>,
    rendered: Option<RenderedTasks>,
}

impl DistroBuilder {
    pub fn new(family: Box<dyn DistroFamily>, metadata: Metadata, network: NetworkData) -> Self {
        Self {
            family,
            metadata,
            network,
            renderer: TemplateRenderer::new(),
            state: BuildState::Unbuilt,
            tasks: None,
            rendered: None,
        }
    }

    pub fn family(&self) -> &str {
        self.family.name()
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn network(&self) -> &NetworkData {
        &self.network
    }

    /// Changes made here show up in the next [`render`](Self::render)
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn network_mut(&mut self) -> &mut NetworkData {
        &mut self.network
    }

    /// Collect tasks; the result is computed once and cached
    ///
    /// Family tasks are only kept when at least one network builder applied,
    /// so an unsupported layout yields an empty task set.
    pub fn build(&mut self) -> Result<&TaskMap> {
        if self.tasks.is_none() {
            let ctx = BuildContext::new(&self.metadata, &self.network)?;

            let mut network_tasks = TaskMap::new();
            for builder in self.family.network_builders() {
                let mut sub = TaskMap::new();
                builder.build(&ctx, &mut sub)?;
                if !sub.is_empty() {
                    debug!("{} builder produced {} tasks", builder.name(), sub.len());
                }
                network_tasks.extend(sub);
            }

            let mut tasks = TaskMap::new();
            if network_tasks.is_empty() {
                warn!(
                    "No {} network builder applies to link aggregation {:?}",
                    self.family.name(),
                    self.network.bonding.link_aggregation
                );
            } else {
                self.family.build_tasks(&ctx, &mut tasks)?;
                tasks.extend(network_tasks);
            }

            self.tasks = Some(tasks);
            self.state = BuildState::Built;
        }
        self.tasks
            .as_ref()
            .ok_or_else(|| NetworkingError::config("task set missing after build"))
    }

    /// Shared template context; rebuilt from the current model on every call
    pub fn context(&self) -> Result<Map<String, Value>> {
        let network = &self.network;
        let os = self.metadata.operating_system()?;

        let first = |list: crate::collections::AddressList| -> Result<Value> {
            match list.first() {
                Some(addr) => Ok(serde_json::to_value(addr)?),
                None => Ok(Value::Null),
            }
        };
        let iface0 = match network.interfaces.first() {
            Some(iface) => serde_json::to_value(iface)?,
            None => Value::Null,
        };

        let mut ctx = Map::new();
        ctx.insert("hostname".into(), Value::from(self.metadata.hostname()?));
        ctx.insert("osinfo".into(), serde_json::to_value(&os)?);
        ctx.insert("net".into(), serde_json::to_value(network)?);
        ctx.insert("interfaces".into(), serde_json::to_value(&network.interfaces)?);
        ctx.insert("iface0".into(), iface0);
        ctx.insert("ip4pub".into(), first(network.ipv4pub())?);
        ctx.insert("ip4priv".into(), first(network.ipv4priv())?);
        ctx.insert("ip6pub".into(), first(network.ipv6pub())?);
        ctx.insert("resolvers".into(), serde_json::to_value(&network.resolvers)?);
        ctx.insert("private_subnets".into(), serde_json::to_value(&network.private_subnets)?);
        ctx.insert("metadata".into(), serde_json::to_value(&self.metadata)?);
        Ok(ctx)
    }

    /// Render the task set; building happens first if needed
    pub fn render(&mut self) -> Result<&RenderedTasks> {
        self.build()?;
        let ctx = self.context()?;
        let tasks = self
            .tasks
            .as_ref()
            .ok_or_else(|| NetworkingError::config("task set missing after build"))?;
        self.rendered = Some(render_tasks(tasks, &ctx, &self.renderer)?);
        self.state = BuildState::Rendered;
        self.rendered
            .as_ref()
            .ok_or_else(|| NetworkingError::config("rendered tasks missing after render"))
    }

    /// Write the rendered tasks beneath `root`, rendering first if needed
    pub fn apply(&mut self, root: &Path) -> Result<ApplyReport> {
        if self.rendered.is_none() {
            self.render()?;
        }
        let rendered = self
            .rendered
            .as_ref()
            .ok_or_else(|| NetworkingError::config("rendered tasks missing after render"))?;

        info!("Applying {} {} tasks to {}", rendered.len(), self.family.name(), root.display());
        let report = apply_tasks(rendered, root)?;
        self.state = BuildState::Applied;
        Ok(report)
    }
}
