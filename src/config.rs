//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identifier of the current cache generation; bumping it invalidates
    /// every previously named cache on the next install/activate cycle
    pub generation: String,
    /// Origin used to classify fetched responses as same-origin ("basic")
    pub site_origin: String,
    /// Path to the resource manifest consumed by the warming binary
    pub manifest_path: String,
    /// Network fetch timeout in seconds
    pub fetch_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_GENERATION` - Current generation identifier (default: "site-v1")
    /// - `SITE_ORIGIN` - Origin of the site being cached (default: "http://localhost:3000")
    /// - `MANIFEST_PATH` - Manifest file location (default: "manifest.json")
    /// - `FETCH_TIMEOUT` - Fetch timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            generation: env::var("CACHE_GENERATION").unwrap_or_else(|_| "site-v1".to_string()),
            site_origin: env::var("SITE_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            manifest_path: env::var("MANIFEST_PATH").unwrap_or_else(|_| "manifest.json".to_string()),
            fetch_timeout: env::var("FETCH_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation: "site-v1".to_string(),
            site_origin: "http://localhost:3000".to_string(),
            manifest_path: "manifest.json".to_string(),
            fetch_timeout: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.generation, "site-v1");
        assert_eq!(config.site_origin, "http://localhost:3000");
        assert_eq!(config.manifest_path, "manifest.json");
        assert_eq!(config.fetch_timeout, 30);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_GENERATION");
        env::remove_var("SITE_ORIGIN");
        env::remove_var("MANIFEST_PATH");
        env::remove_var("FETCH_TIMEOUT");

        let config = Config::from_env();
        assert_eq!(config.generation, "site-v1");
        assert_eq!(config.site_origin, "http://localhost:3000");
        assert_eq!(config.manifest_path, "manifest.json");
        assert_eq!(config.fetch_timeout, 30);
    }
}
