//! HTTP Fetcher Module
//!
//! reqwest-backed implementation of the `Fetcher` trait. Classifies responses
//! as same-origin ("basic") or opaque by comparing the final response origin
//! against the configured site origin.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::cache::{ResponseKind, ResponseSnapshot};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::fetch::{Fetcher, Method, ResourceRequest};

// == HTTP Fetcher ==
/// Network fetcher backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    /// Origin that relative request paths resolve against
    origin: Url,
}

impl HttpFetcher {
    // == Constructor ==
    /// Creates a fetcher from configuration.
    ///
    /// Fails if the configured site origin is not a valid absolute URL.
    pub fn new(config: &Config) -> Result<Self> {
        let origin = Url::parse(&config.site_origin).map_err(|e| CacheError::InvalidUrl {
            url: config.site_origin.clone(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout))
            .build()?;

        Ok(Self { client, origin })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &ResourceRequest) -> Result<ResponseSnapshot> {
        let target = resolve_url(&self.origin, &request.url)?;
        debug!(url = %target, method = request.method.as_str(), "fetching resource");

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Post => reqwest::Method::POST,
        };

        let response = self.client.request(method, target).send().await?;

        // Redirects are followed by the client, so the kind is judged against
        // the final URL, exactly where the bytes came from.
        let kind = if response.url().origin() == self.origin.origin() {
            ResponseKind::Basic
        } else {
            ResponseKind::Opaque
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(ResponseSnapshot::new(status, headers, body, kind))
    }
}

// == URL Resolution ==
/// Resolves a manifest-style locator against the site origin.
///
/// Absolute URLs pass through unchanged; relative paths join onto the origin.
fn resolve_url(origin: &Url, raw: &str) -> Result<Url> {
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            origin.join(raw).map_err(|e| CacheError::InvalidUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            })
        }
        Err(e) => Err(CacheError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}
