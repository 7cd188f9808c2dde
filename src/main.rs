//! Sitewarm - deploy-time cache warmer
//!
//! Runs one install/activate cycle for the configured cache generation:
//! fetches every manifest resource, commits the generation, prunes superseded
//! generations and reports storage statistics. Exits non-zero if the install
//! aborts, leaving any previously retained generation untouched.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitecache::{Config, HttpFetcher, Manifest, OfflineCacheProxy};

/// Main entry point for the cache warmer.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Load the resource manifest from disk
/// 4. Install the configured cache generation (all-or-nothing)
/// 5. Activate, pruning every superseded generation
/// 6. Log resulting cache statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitecache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sitewarm cache warmer");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: generation={}, origin={}, manifest={}, timeout={}s",
        config.generation, config.site_origin, config.manifest_path, config.fetch_timeout
    );

    // Load the manifest supplied at build/deploy time
    let manifest = Manifest::from_file(&config.manifest_path)
        .with_context(|| format!("failed to load manifest from {}", config.manifest_path))?;
    info!("Manifest loaded with {} resources", manifest.len());

    // Build the network fetcher and the proxy for the current generation
    let fetcher = Arc::new(HttpFetcher::new(&config).context("failed to build HTTP fetcher")?);
    let proxy = OfflineCacheProxy::new(config.generation.clone(), fetcher);

    // Install is all-or-nothing: a single unreachable resource aborts the run
    proxy
        .install(&manifest)
        .await
        .context("install aborted, no generation committed")?;

    let pruned = proxy.activate().await;

    let stats = proxy.stats().await;
    info!(
        "Warm complete: generation={}, entries={}, pruned_generations={}",
        config.generation, stats.total_entries, pruned
    );

    Ok(())
}
