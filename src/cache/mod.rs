//! Cache Module
//!
//! Generational named cache storage for response snapshots.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, ResponseKind, ResponseSnapshot};
pub use stats::CacheStats;
pub use store::CacheStorage;

// == Public Constants ==
/// Maximum allowed request identity key length in bytes
pub const MAX_KEY_LENGTH: usize = 2048;

/// Maximum cacheable response body size in bytes
pub const MAX_BODY_SIZE: usize = 8 * 1024 * 1024; // 8 MB
