// file: src/utils/mod.rs
// version: 2.0.0
// guid: v2w3x4y5-z6a7-8901-2345-678901vwxyza

//! Filesystem and version helpers

pub mod paths;
pub mod version;

pub use paths::{resolve_path, resolve_path_with_limit, MAX_RESOLVE_DEPTH};
pub use version::{compare_versions, version_at_least};
