// file: src/config/mod.rs
// version: 2.0.0
// guid: a1b2c3d4-e5f6-7a8b-9c0d-1e2f3a4b5c6d

//! Run configuration for provision-networking
//!
//! Collects where metadata comes from, which operating system to configure
//! and where the target root filesystem is mounted.

pub mod loader;

pub use loader::MetadataLoader;

use crate::error::NetworkingError;
use crate::network::discovery::SYSFS_NET_PATH;
use crate::Result;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Where metadata is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    File(PathBuf),
    Url(String),
}

impl MetadataSource {
    /// Pick a source, preferring a file over a URL
    pub fn from_options(file: Option<PathBuf>, url: Option<String>) -> Result<Self> {
        let url = url.filter(|u| !u.trim().is_empty());
        match (file, url) {
            (Some(file), Some(url)) => {
                debug!(
                    "Metadata file '{}' specified, preferring over metadata url {}",
                    file.display(),
                    url
                );
                Ok(Self::File(file))
            }
            (Some(file), None) => Ok(Self::File(file)),
            (None, Some(url)) => Ok(Self::Url(url)),
            (None, None) => Err(NetworkingError::NoMetadataSource),
        }
    }
}

impl std::fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Operating system named on the command line, e.g. `centos 7`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsSpec {
    pub distro: String,
    pub version: String,
}

impl std::str::FromStr for OsSpec {
    type Err = NetworkingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.as_slice() {
            [distro, version] => Ok(Self {
                distro: distro.to_lowercase(),
                version: version.to_string(),
            }),
            _ => Err(NetworkingError::InvalidOperatingSystem { value: s.to_string() }),
        }
    }
}

/// Split a comma separated resolver list, dropping blanks
pub fn parse_resolvers(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect()
}

/// Everything one run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub metadata: MetadataSource,
    pub operating_system: OsSpec,
    pub rootfs: PathBuf,
    /// Replaces resolvers from metadata and the host when non-empty
    pub resolvers: Option<Vec<String>>,
    pub retries: u32,
    pub retry_delay: Duration,
    pub sysfs_path: PathBuf,
}

impl RunConfig {
    pub fn new(metadata: MetadataSource, operating_system: OsSpec, rootfs: impl Into<PathBuf>) -> Self {
        Self {
            metadata,
            operating_system,
            rootfs: rootfs.into(),
            resolvers: None,
            retries: DEFAULT_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            sysfs_path: PathBuf::from(SYSFS_NET_PATH),
        }
    }

    /// Use `list` as resolvers unless it contains no usable entry
    pub fn with_resolvers(mut self, list: &str) -> Self {
        let resolvers = parse_resolvers(list);
        self.resolvers = (!resolvers.is_empty()).then_some(resolvers);
        self
    }

    pub fn with_retries(mut self, retries: u32, delay: Duration) -> Self {
        self.retries = retries;
        self.retry_delay = delay;
        self
    }

    pub fn with_sysfs_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sysfs_path = path.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rootfs.as_os_str().is_empty() {
            return Err(NetworkingError::validation("rootfs path must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_spec_parsing() -> Result<()> {
        let spec: OsSpec = "CentOS 7".parse()?;
        assert_eq!(spec.distro, "centos");
        assert_eq!(spec.version, "7");

        let spec: OsSpec = "  ubuntu   20.04 ".parse()?;
        assert_eq!(spec.version, "20.04");
        Ok(())
    }

    #[test]
    fn test_os_spec_needs_two_words() {
        for value in ["centos", "", "ubuntu 20.04 lts"] {
            let err = value.parse::<OsSpec>().unwrap_err();
            assert_eq!(err.exit_code(), 20, "{value:?}");
        }
    }

    #[test]
    fn test_metadata_source_selection() -> Result<()> {
        let file = PathBuf::from("/tmp/metadata.json");
        assert_eq!(
            MetadataSource::from_options(Some(file.clone()), Some("http://md/metadata".into()))?,
            MetadataSource::File(file)
        );
        assert_eq!(
            MetadataSource::from_options(None, Some("http://md/metadata".into()))?,
            MetadataSource::Url("http://md/metadata".into())
        );

        let err = MetadataSource::from_options(None, Some("  ".into())).unwrap_err();
        assert_eq!(err.exit_code(), 10);
        Ok(())
    }

    #[test]
    fn test_resolver_override() {
        // Arrange
        let source = MetadataSource::Url("http://md".into());
        let os = OsSpec {
            distro: "debian".into(),
            version: "10".into(),
        };

        // Act
        let config = RunConfig::new(source.clone(), os.clone(), "/mnt/target").with_resolvers("1.1.1.1, ,8.8.8.8,");
        let blank = RunConfig::new(source, os, "/mnt/target").with_resolvers(" , ");

        // Assert
        assert_eq!(config.resolvers, Some(vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()]));
        assert_eq!(blank.resolvers, None);
        assert_eq!(config.retries, DEFAULT_RETRIES);
        assert_eq!(config.sysfs_path, PathBuf::from(SYSFS_NET_PATH));
    }
}
