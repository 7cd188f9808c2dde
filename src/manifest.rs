//! Manifest Module
//!
//! The ordered list of resource URLs pre-cached during install. The manifest is
//! an opaque configuration input supplied at build/deploy time; there is no
//! schema beyond "list of fetchable URLs".

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == Manifest ==
/// Ordered sequence of resource locators (relative paths and absolute URLs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    urls: Vec<String>,
}

impl Manifest {
    // == Constructor ==
    /// Creates a manifest from a list of URLs.
    ///
    /// Fails if the list is empty or any entry is blank; order is preserved.
    pub fn new(urls: Vec<String>) -> Result<Self> {
        if urls.is_empty() {
            return Err(CacheError::InvalidManifest(
                "manifest contains no URLs".to_string(),
            ));
        }
        if let Some(blank) = urls.iter().find(|u| u.trim().is_empty()) {
            return Err(CacheError::InvalidManifest(format!(
                "manifest contains a blank entry: {:?}",
                blank
            )));
        }
        Ok(Self { urls })
    }

    // == From JSON ==
    /// Parses a manifest from a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let urls: Vec<String> = serde_json::from_str(json)?;
        Self::new(urls)
    }

    // == From File ==
    /// Loads a manifest from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Returns the manifest URLs in declaration order.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Returns the number of resources in the manifest.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if the manifest has no entries.
    ///
    /// Always false for a constructed manifest; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
