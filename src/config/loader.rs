// file: src/config/loader.rs
// version: 2.0.0
// guid: d4e5f6g7-h8i9-0123-4567-890123defghi

//! Metadata loading from files or the metadata service

use super::MetadataSource;
use crate::error::NetworkingError;
use crate::metadata::Metadata;
use crate::Result;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Loads metadata, retrying the whole load on failure
pub struct MetadataLoader {
    client: reqwest::Client,
    retries: u32,
    retry_delay: Duration,
}

impl Default for MetadataLoader {
    fn default() -> Self {
        Self::new(super::DEFAULT_RETRIES, Duration::from_millis(super::DEFAULT_RETRY_DELAY_MS))
    }
}

impl MetadataLoader {
    pub fn new(retries: u32, retry_delay: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            retries,
            retry_delay,
        }
    }

    /// Load metadata from `source`, trying up to `retries + 1` times
    pub async fn load(&self, source: &MetadataSource) -> Result<Metadata> {
        let mut attempt = 0;
        loop {
            match self.load_once(source).await {
                Ok(metadata) => {
                    info!("Loaded metadata from {}", source);
                    return Ok(metadata);
                }
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        "Loading metadata from {} failed ({}), retry {}/{}",
                        source, e, attempt, self.retries
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn load_once(&self, source: &MetadataSource) -> Result<Metadata> {
        match source {
            MetadataSource::File(path) => load_file(path),
            MetadataSource::Url(url) => self.fetch(url).await,
        }
    }

    async fn fetch(&self, url: &str) -> Result<Metadata> {
        debug!("Fetching metadata from {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        parse_metadata(&body, is_yaml(url))
    }
}

/// Read metadata from a JSON or YAML file
pub fn load_file(path: &Path) -> Result<Metadata> {
    let content = fs::read_to_string(path).map_err(|e| NetworkingError::filesystem(path, e))?;
    parse_metadata(&content, is_yaml(&path.to_string_lossy()))
}

/// Parse a metadata document
pub fn parse_metadata(content: &str, yaml: bool) -> Result<Metadata> {
    let value: Value = if yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    Metadata::from_value(value)
}

fn is_yaml(name: &str) -> bool {
    let name = name.to_lowercase();
    name.ends_with(".yaml") || name.ends_with(".yml")
}
