// file: src/error.rs
// version: 3.0.0
// guid: 57b83a63-07b6-4534-aa6c-51e8797254e0

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, NetworkingError>;

/// Error types for network configuration generation
#[derive(Error, Debug)]
pub enum NetworkingError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Metadata error: {0}")]
    MetadataError(String),

    #[error("'{type_name}' has no attribute '{key}'")]
    AttributeMissing { type_name: String, key: String },

    #[error("No interfaces matched ones provided from metadata ({declared} declared, {discovered} discovered)")]
    NoInterfacesMatched { declared: usize, discovered: usize },

    #[error("No builders found for distro '{distro}'")]
    UnsupportedDistro { distro: String },

    #[error("Undefined template variable in task '{task}'{}: {detail}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    TemplateContract {
        task: String,
        line: Option<usize>,
        detail: String,
    },

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Symlink max depth ({depth}) reached while resolving {}", .path.display())]
    SymlinkDepth { path: PathBuf, depth: usize },

    #[error("Filesystem error at {}: {source}", .path.display())]
    FilesystemError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("--metadata-file or --metadata-url must be specified")]
    NoMetadataSource,

    #[error("Operating system '{value}' must include both distro and version")]
    InvalidOperatingSystem { value: String },

    #[error("Interface discovery error: {0}")]
    DiscoveryError(String),

    #[error("No network tasks produced for distro '{distro}'")]
    NoTasks { distro: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl NetworkingError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a new metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::MetadataError(msg.into())
    }

    /// Create a missing attribute error for a container type
    pub fn attribute_missing(type_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::AttributeMissing {
            type_name: type_name.into(),
            key: key.into(),
        }
    }

    /// Wrap an IO error with the path it occurred on
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FilesystemError {
            path: path.into(),
            source,
        }
    }

    /// Process exit code used by the command line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoMetadataSource => 10,
            Self::InvalidOperatingSystem { .. } => 20,
            Self::NoTasks { .. } => 30,
            Self::UnsupportedDistro { .. } => 40,
            Self::NoInterfacesMatched { .. } => 50,
            _ => 1,
        }
    }
}
