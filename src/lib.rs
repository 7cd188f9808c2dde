//! Sitecache - A cache-first offline resource proxy
//!
//! Provides generational cache storage with an install/activate lifecycle and
//! cache-first request handling with network fallback.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod proxy;

pub use config::Config;
pub use error::{CacheError, Result};
pub use fetch::{Fetcher, HttpFetcher, Method, ResourceRequest};
pub use manifest::Manifest;
pub use proxy::{LifecycleState, OfflineCacheProxy};
