//! Trial count files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads whitespace-separated non-negative integers.
pub fn read_counts(path: &Path) -> Result<Vec<u64>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_counts(&text).with_context(|| format!("malformed counts in {}", path.display()))
}

fn parse_counts(text: &str) -> Result<Vec<u64>> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse()
                .with_context(|| format!("entry {i}: '{token}' is not a count"))
        })
        .collect()
}
