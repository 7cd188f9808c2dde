//! Fetch Module
//!
//! The network primitive consumed by the proxy: a request identity type and a
//! `Fetcher` trait with an HTTP implementation.

mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;

use crate::cache::ResponseSnapshot;
use crate::error::Result;

// == Method ==
/// HTTP method of a resource request.
///
/// Only GET responses are ever cached; other methods pass straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Head,
    Post,
}

impl Method {
    /// Canonical method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
        }
    }
}

// == Resource Request ==
/// Identity of an outbound resource request: method plus URL.
///
/// The URL may be a relative path (resolved against the configured site
/// origin) or an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    /// HTTP method
    pub method: Method,
    /// Relative path or absolute URL
    pub url: String,
}

impl ResourceRequest {
    // == Constructor ==
    /// Creates a GET request for a URL.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
        }
    }

    /// Creates a request with an explicit method.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }

    // == Cache Key ==
    /// Request identity used as the cache lookup key.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method.as_str(), self.url)
    }

    /// Returns true for GET requests, the only cacheable method.
    pub fn is_cacheable_method(&self) -> bool {
        self.method == Method::Get
    }
}

// == Fetcher Trait ==
/// Network primitive: performs a resource fetch and returns a full snapshot.
///
/// Implementations must be shareable across tasks; the proxy holds one behind
/// an `Arc<dyn Fetcher>`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the requested resource from the network.
    ///
    /// A failed fetch is an error; a reachable server answering with an error
    /// status is a successful fetch whose snapshot carries that status.
    async fn fetch(&self, request: &ResourceRequest) -> Result<ResponseSnapshot>;
}
