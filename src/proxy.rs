//! Offline Cache Proxy Module
//!
//! Cache-first resource proxy with a generational lifecycle:
//! install populates a named cache generation from a manifest, activate prunes
//! every superseded generation, and handle serves requests cache-first with
//! network fallback.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheStats, CacheStorage, ResponseSnapshot};
use crate::error::{CacheError, Result};
use crate::fetch::{Fetcher, ResourceRequest};
use crate::manifest::Manifest;

// == Lifecycle State ==
/// Lifecycle of a proxy generation.
///
/// `Activating` is the transient step between a successful install and the
/// generation becoming current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created or mid-install; not yet serving from a populated generation
    Installing,
    /// Install committed, activation not yet run
    Installed,
    /// Pruning superseded generations
    Activating,
    /// Current generation is serving traffic
    Active,
}

// == Offline Cache Proxy ==
/// Cache-first proxy over a shared generational cache storage.
///
/// Clones share the same storage and statistics, modelling concurrent page
/// instances of the same origin. All storage mutations are whole-entry
/// overwrites or whole-generation deletions, so concurrent handlers never
/// observe a partially written entry.
#[derive(Clone)]
pub struct OfflineCacheProxy {
    /// Identifier of the current cache generation
    generation: String,
    /// Shared named cache storage
    storage: Arc<RwLock<CacheStorage>>,
    /// Network primitive used on cache misses and during install
    fetcher: Arc<dyn Fetcher>,
    /// Lifecycle state, shared across clones
    state: Arc<RwLock<LifecycleState>>,
}

impl OfflineCacheProxy {
    // == Constructor ==
    /// Creates a proxy for the given generation with empty storage.
    ///
    /// # Arguments
    /// * `generation` - Current generation identifier; bumping it and re-running
    ///   install/activate invalidates all previously named caches
    /// * `fetcher` - Network primitive used for install and cache misses
    pub fn new(generation: impl Into<String>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            generation: generation.into(),
            storage: Arc::new(RwLock::new(CacheStorage::new())),
            fetcher,
            state: Arc::new(RwLock::new(LifecycleState::Installing)),
        }
    }

    /// Creates a proxy sharing existing storage, e.g. one left behind by a
    /// previous generation of the same origin.
    pub fn with_storage(
        generation: impl Into<String>,
        fetcher: Arc<dyn Fetcher>,
        storage: Arc<RwLock<CacheStorage>>,
    ) -> Self {
        Self {
            generation: generation.into(),
            storage,
            fetcher,
            state: Arc::new(RwLock::new(LifecycleState::Installing)),
        }
    }

    /// Creates a proxy for a new generation over the same storage and
    /// fetcher, modelling a new version deploying on the same origin.
    ///
    /// The new proxy starts in `Installing`; the existing generation keeps
    /// serving until the new one installs and activates.
    pub fn clone_for_generation(&self, generation: impl Into<String>) -> Self {
        Self {
            generation: generation.into(),
            storage: self.storage.clone(),
            fetcher: self.fetcher.clone(),
            state: Arc::new(RwLock::new(LifecycleState::Installing)),
        }
    }

    /// Identifier of the generation this proxy serves from.
    pub fn generation(&self) -> &str {
        &self.generation
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> LifecycleState {
        *self.state.read().await
    }

    /// Snapshot of storage statistics.
    pub async fn stats(&self) -> CacheStats {
        self.storage.read().await.stats()
    }

    // == Install ==
    /// Populates the current generation from the manifest, all-or-nothing.
    ///
    /// Every URL is fetched in manifest order and staged locally; the staged
    /// set is committed to the generation-named cache in one step only after
    /// every fetch succeeded with a cacheable (successful, same-origin)
    /// response. A single failure aborts the install and leaves the storage
    /// untouched, so an older generation keeps serving.
    ///
    /// Re-running install with the same manifest overwrites the generation
    /// with an identical entry set.
    pub async fn install(&self, manifest: &Manifest) -> Result<()> {
        *self.state.write().await = LifecycleState::Installing;
        info!(
            generation = %self.generation,
            resources = manifest.len(),
            "installing cache generation"
        );

        let mut staged: HashMap<String, CacheEntry> = HashMap::new();
        for url in manifest.urls() {
            let request = ResourceRequest::get(url.clone());
            let snapshot =
                self.fetcher
                    .fetch(&request)
                    .await
                    .map_err(|e| CacheError::InstallAborted {
                        url: url.clone(),
                        reason: e.to_string(),
                    })?;

            if !snapshot.is_cacheable() {
                return Err(CacheError::InstallAborted {
                    url: url.clone(),
                    reason: format!("response not cacheable (status {})", snapshot.status),
                });
            }

            staged.insert(request.cache_key(), CacheEntry::new(snapshot));
        }

        self.storage
            .write()
            .await
            .replace_generation(&self.generation, staged)?;
        *self.state.write().await = LifecycleState::Installed;

        info!(generation = %self.generation, "cache generation installed");
        Ok(())
    }

    // == Activate ==
    /// Makes this generation current by deleting every other generation.
    ///
    /// Deletion is irreversible and atomic per name; in-flight lookups against
    /// an old generation either complete before its deletion or miss after,
    /// never observe partial contents. Returns the number of generations
    /// pruned.
    pub async fn activate(&self) -> usize {
        *self.state.write().await = LifecycleState::Activating;

        let pruned = {
            let mut storage = self.storage.write().await;
            let stale: Vec<String> = storage
                .generation_names()
                .into_iter()
                .filter(|name| name != &self.generation)
                .collect();

            for name in &stale {
                info!(stale = %name, "deleting superseded cache generation");
                storage.delete_generation(name);
            }
            stale.len()
        };

        *self.state.write().await = LifecycleState::Active;
        info!(generation = %self.generation, pruned, "cache generation activated");
        pruned
    }

    // == Handle ==
    /// Serves a resource request cache-first.
    ///
    /// A stored entry is returned as-is: no network round trip, no freshness
    /// check, no revalidation. On a miss the fetcher is invoked exactly once;
    /// a successful, same-origin GET response is copied into the current
    /// generation before being returned, anything else (opaque, redirect,
    /// error status, non-GET) passes through uncached. A failed cache write is
    /// logged and ignored since the response is delivered regardless; a failed
    /// network fetch propagates to the caller.
    pub async fn handle(&self, request: &ResourceRequest) -> Result<ResponseSnapshot> {
        let key = request.cache_key();

        let cached = self.storage.write().await.lookup(&self.generation, &key);
        if let Some(entry) = cached {
            debug!(%key, "cache hit");
            return Ok(entry.snapshot);
        }

        debug!(%key, "cache miss, fetching from network");
        let snapshot = self.fetcher.fetch(request).await?;

        if request.is_cacheable_method() && snapshot.is_cacheable() {
            let entry = CacheEntry::new(snapshot.clone());
            let mut storage = self.storage.write().await;
            storage.open(&self.generation);
            if let Err(e) = storage.put(&self.generation, key, entry) {
                warn!(error = %e, "cache write failed, serving response uncached");
            }
        }

        Ok(snapshot)
    }
}
