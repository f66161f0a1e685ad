// file: src/cli/args.rs
// version: 2.0.0
// guid: f6g7h8i9-j0k1-2345-6789-012345fghijk

//! Command line argument definitions

use crate::config::{MetadataSource, OsSpec, RunConfig, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY_MS};
use crate::network::discovery::SYSFS_NET_PATH;
use crate::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "provision-networking")]
#[command(about = "Write network configuration for a freshly installed OS from provisioning metadata")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[arg(long, help = "Load metadata from a file rather than a URL")]
    pub metadata_file: Option<PathBuf>,

    #[arg(long, env = "METADATA_URL", help = "URL to download metadata from")]
    pub metadata_url: Option<String>,

    #[arg(short = 'o', long, help = "Operating system and version (ex: \"centos 7\")")]
    pub operating_system: String,

    #[arg(long, help = "Path to the target root filesystem")]
    pub rootfs: PathBuf,

    #[arg(
        long,
        env = "NETWORK_RESOLVERS",
        help = "Comma separated resolvers (otherwise taken from metadata or /etc/resolv.conf)"
    )]
    pub resolvers: Option<String>,

    #[arg(long, default_value_t = DEFAULT_RETRIES, help = "Retries when loading metadata fails")]
    pub retries: u32,

    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY_MS, help = "Delay between metadata retries")]
    pub retry_delay_ms: u64,

    #[arg(long, default_value = SYSFS_NET_PATH, help = "Directory listing network devices")]
    pub sysfs_path: PathBuf,

    #[arg(short, long, action = ArgAction::Count, help = "More detailed output (repeatable)")]
    pub verbose: u8,

    #[arg(short, long, help = "Silence all output")]
    pub quiet: bool,
}

impl Cli {
    /// Validate the arguments into a [`RunConfig`]
    ///
    /// The metadata source is checked before the operating system.
    pub fn to_config(&self) -> Result<RunConfig> {
        let source = MetadataSource::from_options(self.metadata_file.clone(), self.metadata_url.clone())?;
        let os: OsSpec = self.operating_system.parse()?;

        let mut config = RunConfig::new(source, os, &self.rootfs)
            .with_retries(self.retries, Duration::from_millis(self.retry_delay_ms))
            .with_sysfs_path(&self.sysfs_path);
        if let Some(resolvers) = &self.resolvers {
            config = config.with_resolvers(resolvers);
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkingError;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["provision-networking"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_full_argument_set() -> Result<()> {
        // Arrange
        let cli = parse(&[
            "--metadata-file",
            "/tmp/md.json",
            "-o",
            "Ubuntu 20.04",
            "--rootfs",
            "/mnt/target",
            "--resolvers",
            "1.1.1.1,8.8.8.8",
            "--retries",
            "5",
            "-vv",
        ]);

        // Act
        let config = cli.to_config()?;

        // Assert
        assert_eq!(cli.verbose, 2);
        assert_eq!(config.metadata, MetadataSource::File("/tmp/md.json".into()));
        assert_eq!(config.operating_system.distro, "ubuntu");
        assert_eq!(config.rootfs, PathBuf::from("/mnt/target"));
        assert_eq!(config.resolvers, Some(vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()]));
        assert_eq!(config.retries, 5);
        assert_eq!(config.retry_delay, Duration::from_millis(DEFAULT_RETRY_DELAY_MS));
        Ok(())
    }

    #[test]
    fn test_metadata_source_checked_before_os() {
        let cli = Cli {
            metadata_file: None,
            metadata_url: None,
            operating_system: "centos".into(),
            rootfs: "/mnt".into(),
            resolvers: None,
            retries: 0,
            retry_delay_ms: 0,
            sysfs_path: SYSFS_NET_PATH.into(),
            verbose: 0,
            quiet: false,
        };
        assert!(matches!(cli.to_config(), Err(NetworkingError::NoMetadataSource)));
    }

    #[test]
    fn test_operating_system_needs_version() {
        let cli = parse(&["--metadata-file", "/tmp/md.json", "-o", "centos", "--rootfs", "/mnt"]);
        let err = cli.to_config().unwrap_err();
        assert_eq!(err.exit_code(), 20);
    }

    #[test]
    fn test_required_arguments() {
        assert!(Cli::try_parse_from(["provision-networking", "--rootfs", "/mnt"]).is_err());
        assert!(Cli::try_parse_from(["provision-networking", "-o", "centos 7"]).is_err());
    }
}
