// file: src/network/resolvers.rs
// version: 1.0.0
// guid: 9a2d7c51-0e4b-4f86-a3d2-5c1b8e7f0a64

//! DNS resolver discovery from resolv.conf

use crate::error::NetworkingError;
use crate::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Host resolver configuration consulted when metadata carries none
pub const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

/// Fallback when neither metadata nor the host name any resolvers
pub const DEFAULT_RESOLVERS: &[&str] = &["147.75.207.207", "147.75.207.208"];

/// IPv4 nameservers listed in resolv.conf content, in file order
pub fn parse_nameservers(content: &str) -> Result<Vec<String>> {
    let nameserver_re = Regex::new(r"^nameserver ([0-9]+(\.[0-9]+){3})$")
        .map_err(|e| NetworkingError::config(format!("invalid nameserver pattern: {}", e)))?;

    Ok(content
        .lines()
        .filter_map(|line| nameserver_re.captures(line.trim_end()))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect())
}

/// Nameservers from `path`, or `default` when the file is unreadable or lists none
pub fn system_resolvers(path: &Path, default: &[String]) -> Vec<String> {
    let found = fs::read_to_string(path)
        .map_err(NetworkingError::from)
        .and_then(|content| parse_nameservers(&content))
        .unwrap_or_else(|e| {
            debug!("No resolvers from {}: {}", path.display(), e);
            Vec::new()
        });

    if found.is_empty() {
        default.to_vec()
    } else {
        found
    }
}

/// The built-in fallback list as owned strings
pub fn default_resolvers() -> Vec<String> {
    DEFAULT_RESOLVERS.iter().map(|s| s.to_string()).collect()
}
