//! Cache Entry Module
//!
//! Defines the structures for stored response snapshots.

use bytes::Bytes;
use chrono::{DateTime, Utc};

// == Response Kind ==
/// Classification of a fetched response, mirroring the browser's response types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin response whose contents are fully visible
    Basic,
    /// Cross-origin response whose contents cannot be inspected; never cached
    Opaque,
}

// == Response Snapshot ==
/// An immutable snapshot of a fetched response: status, headers and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSnapshot {
    /// HTTP status code
    pub status: u16,
    /// Response header pairs in arrival order
    pub headers: Vec<(String, String)>,
    /// Full response body
    pub body: Bytes,
    /// Same-origin or opaque classification
    pub kind: ResponseKind,
}

impl ResponseSnapshot {
    // == Constructor ==
    /// Creates a new response snapshot.
    pub fn new(
        status: u16,
        headers: Vec<(String, String)>,
        body: impl Into<Bytes>,
        kind: ResponseKind,
    ) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            kind,
        }
    }

    // == Is Cacheable ==
    /// Returns true if this response may be written to the cache.
    ///
    /// Only plain successful same-origin responses qualify. Opaque cross-origin
    /// results, redirects and errors are passed through to the caller but never
    /// stored, which keeps partial or error content out of the cache.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && self.kind == ResponseKind::Basic
    }
}

// == Cache Entry ==
/// A stored response snapshot with storage metadata.
///
/// Entries are immutable once stored; a new fetch overwrites the whole entry
/// rather than mutating it.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response
    pub snapshot: ResponseSnapshot,
    /// When the snapshot was written to the cache
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry, timestamping it with the current time.
    pub fn new(snapshot: ResponseSnapshot) -> Self {
        Self {
            snapshot,
            stored_at: Utc::now(),
        }
    }

    /// Size in bytes of the stored body, used for quota accounting.
    pub fn body_size(&self) -> usize {
        self.snapshot.body.len()
    }
}
