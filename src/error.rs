//! Error types for the offline cache proxy
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache proxy.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Install aborted because a manifest resource could not be fetched
    #[error("Install aborted: failed to fetch '{url}': {reason}")]
    InstallAborted { url: String, reason: String },

    /// Network fetch failed
    #[error("Network fetch failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Fetch failed for reasons outside the HTTP client
    #[error("Fetch failed for '{url}': {reason}")]
    FetchFailed { url: String, reason: String },

    /// Request URL could not be parsed or resolved
    #[error("Invalid resource URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Named cache generation does not exist
    #[error("Cache generation not found: {0}")]
    GenerationNotFound(String),

    /// Entry rejected by the storage quota
    #[error("Entry exceeds storage quota: {size} bytes (max {max})")]
    QuotaExceeded { size: usize, max: usize },

    /// Request identity key is malformed or too long
    #[error("Invalid request key: {0}")]
    InvalidKey(String),

    /// Manifest is empty or contains unusable entries
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Manifest file could not be read
    #[error("Manifest I/O error: {0}")]
    ManifestIo(#[from] std::io::Error),

    /// Manifest file could not be parsed
    #[error("Manifest parse error: {0}")]
    ManifestParse(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache proxy.
pub type Result<T> = std::result::Result<T, CacheError>;
