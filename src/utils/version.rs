// file: src/utils/version.rs
// version: 1.0.0
// guid: 8f3a6c1e-2b7d-4a95-b0e4-7d1c9a2f6e58

//! Dotted version comparisons for distro version gates

use std::cmp::Ordering;

fn segments(version: &str) -> Vec<u64> {
    version
        .trim()
        .split(['.', '-', '_'])
        .map(|s| {
            let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}

/// Compare two dotted versions numerically, padding missing segments with zero
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a, b) = (segments(a), segments(b));
    let len = a.len().max(b.len());
    for i in 0..len {
        let ord = a.get(i).unwrap_or(&0).cmp(b.get(i).unwrap_or(&0));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Whether `version` is `minimum` or newer
pub fn version_at_least(version: &str, minimum: &str) -> bool {
    compare_versions(version, minimum) != Ordering::Less
}
