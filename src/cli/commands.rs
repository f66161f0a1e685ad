// file: src/cli/commands.rs
// version: 2.0.0
// guid: g7h8i9j0-k1l2-3456-7890-123456ghijkl

//! Command implementation for the CLI

use super::args::Cli;
use crate::config::MetadataLoader;
use crate::distros::ApplyReport;
use crate::error::NetworkingError;
use crate::logging::with_async_operation_span;
use crate::network::SysfsDiscovery;
use crate::provisioner::Provisioner;
use anyhow::{Context, Result};
use tracing::info;

/// Load metadata, generate configuration and write it under `--rootfs`
pub async fn run_command(cli: &Cli) -> Result<ApplyReport> {
    let config = cli.to_config()?;

    let loader = MetadataLoader::new(config.retries, config.retry_delay);
    let metadata = with_async_operation_span("load", || loader.load(&config.metadata))
        .await
        .with_context(|| format!("Failed to load metadata from {}", config.metadata))?;

    let mut provisioner = Provisioner::new(metadata);
    let os = &config.operating_system;
    provisioner.set_operating_system(&os.distro, &os.version)?;

    let discovery = SysfsDiscovery::new(&config.sysfs_path);
    provisioner
        .initialize(&discovery)
        .context("Failed to initialize network data")?;

    if let Some(resolvers) = config.resolvers.clone() {
        provisioner.set_resolvers(resolvers)?;
    }

    let report = provisioner
        .run(&config.rootfs)
        .with_context(|| format!("Failed to configure {} {}", os.distro, os.version))?;
    info!(
        "{} files written, {} removed",
        report.written.len(),
        report.deleted.len()
    );
    Ok(report)
}

/// Process exit code for a failed run
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<NetworkingError>())
        .map(NetworkingError::exit_code)
        .unwrap_or(1)
}
