//! Cache Storage Module
//!
//! Named cache storage: each generation is an independent map from request
//! identity to stored response snapshot. Mutations are whole-entry overwrites
//! and whole-generation deletions; no partial-entry mutation exists.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats, MAX_BODY_SIZE, MAX_KEY_LENGTH};
use crate::error::{CacheError, Result};

// == Cache Storage ==
/// Named cache storage holding every retained generation.
#[derive(Debug, Default)]
pub struct CacheStorage {
    /// Generation name -> (request identity -> stored entry)
    generations: HashMap<String, HashMap<String, CacheEntry>>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStorage {
    // == Constructor ==
    /// Creates empty cache storage with no generations.
    pub fn new() -> Self {
        Self::default()
    }

    // == Open ==
    /// Opens the named generation, creating it empty if absent.
    pub fn open(&mut self, name: &str) {
        self.generations.entry(name.to_string()).or_default();
    }

    // == Lookup ==
    /// Looks up a request identity in the named generation.
    ///
    /// Returns a clone of the stored entry if present. Records a hit or miss
    /// in the statistics; a lookup against a missing generation is a miss.
    pub fn lookup(&mut self, name: &str, key: &str) -> Option<CacheEntry> {
        let found = self
            .generations
            .get(name)
            .and_then(|entries| entries.get(key))
            .cloned();

        match found {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores an entry under a request identity in the named generation.
    ///
    /// Overwrites the whole entry if the key already exists. Fails if the
    /// generation has not been opened, the key is oversized, or the body
    /// exceeds the storage quota.
    pub fn put(&mut self, name: &str, key: String, entry: CacheEntry) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if entry.body_size() > MAX_BODY_SIZE {
            return Err(CacheError::QuotaExceeded {
                size: entry.body_size(),
                max: MAX_BODY_SIZE,
            });
        }

        let entries = self
            .generations
            .get_mut(name)
            .ok_or_else(|| CacheError::GenerationNotFound(name.to_string()))?;

        entries.insert(key, entry);
        self.stats.record_store();
        Ok(())
    }

    // == Replace Generation ==
    /// Replaces the named generation wholesale with a pre-built entry set.
    ///
    /// This is the atomic commit used by install: either every entry lands or,
    /// if the caller never reaches this point, none do. Creates the generation
    /// if absent. Quota limits apply to every entry before anything is written.
    pub fn replace_generation(
        &mut self,
        name: &str,
        entries: HashMap<String, CacheEntry>,
    ) -> Result<()> {
        for (key, entry) in &entries {
            if key.len() > MAX_KEY_LENGTH {
                return Err(CacheError::InvalidKey(format!(
                    "key exceeds maximum length of {} bytes",
                    MAX_KEY_LENGTH
                )));
            }
            if entry.body_size() > MAX_BODY_SIZE {
                return Err(CacheError::QuotaExceeded {
                    size: entry.body_size(),
                    max: MAX_BODY_SIZE,
                });
            }
        }

        let stored = entries.len() as u64;
        self.generations.insert(name.to_string(), entries);
        self.stats.record_stores(stored);
        Ok(())
    }

    // == Generation Names ==
    /// Returns the names of every retained generation.
    pub fn generation_names(&self) -> Vec<String> {
        self.generations.keys().cloned().collect()
    }

    // == Delete Generation ==
    /// Deletes an entire named generation.
    ///
    /// Returns true if the generation existed. Deletion is atomic per name.
    pub fn delete_generation(&mut self, name: &str) -> bool {
        let deleted = self.generations.remove(name).is_some();
        if deleted {
            self.stats.record_prune();
        }
        deleted
    }

    // == Contains ==
    /// Returns true if the named generation holds an entry for the key.
    ///
    /// Does not touch hit/miss statistics.
    pub fn contains(&self, name: &str, key: &str) -> bool {
        self.generations
            .get(name)
            .is_some_and(|entries| entries.contains_key(key))
    }

    // == Length ==
    /// Returns the number of entries in the named generation, zero if absent.
    pub fn len(&self, name: &str) -> usize {
        self.generations.get(name).map_or(0, HashMap::len)
    }

    /// Returns true if the named generation is absent or empty.
    pub fn is_empty(&self, name: &str) -> bool {
        self.len(name) == 0
    }

    // == Stats ==
    /// Returns current storage statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.generations.values().map(HashMap::len).sum());
        stats
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ResponseKind, ResponseSnapshot};
    use bytes::Bytes;

    fn entry(body: &'static [u8]) -> CacheEntry {
        CacheEntry::new(ResponseSnapshot::new(
            200,
            vec![("content-type".to_string(), "text/html".to_string())],
            Bytes::from_static(body),
            ResponseKind::Basic,
        ))
    }

    #[test]
    fn test_open_creates_empty_generation() {
        let mut storage = CacheStorage::new();
        storage.open("v1");

        assert_eq!(storage.generation_names(), vec!["v1".to_string()]);
        assert!(storage.is_empty("v1"));
    }

    #[test]
    fn test_open_is_idempotent() {
        let mut storage = CacheStorage::new();
        storage.open("v1");
        storage
            .put("v1", "GET /index.html".to_string(), entry(b"<html>"))
            .unwrap();

        // Reopening must not clear existing entries
        storage.open("v1");
        assert_eq!(storage.len("v1"), 1);
    }

    #[test]
    fn test_put_and_lookup() {
        let mut storage = CacheStorage::new();
        storage.open("v1");
        storage
            .put("v1", "GET /index.html".to_string(), entry(b"<html>"))
            .unwrap();

        let found = storage.lookup("v1", "GET /index.html").unwrap();
        assert_eq!(found.snapshot.body, Bytes::from_static(b"<html>"));
    }

    #[test]
    fn test_lookup_miss() {
        let mut storage = CacheStorage::new();
        storage.open("v1");

        assert!(storage.lookup("v1", "GET /missing.js").is_none());
        assert!(storage.lookup("v0", "GET /index.html").is_none());
    }

    #[test]
    fn test_put_without_open_fails() {
        let mut storage = CacheStorage::new();

        let result = storage.put("v1", "GET /index.html".to_string(), entry(b"x"));
        assert!(matches!(result, Err(CacheError::GenerationNotFound(_))));
    }

    #[test]
    fn test_put_overwrites_whole_entry() {
        let mut storage = CacheStorage::new();
        storage.open("v1");
        storage
            .put("v1", "GET /app.js".to_string(), entry(b"old"))
            .unwrap();
        storage
            .put("v1", "GET /app.js".to_string(), entry(b"new"))
            .unwrap();

        assert_eq!(storage.len("v1"), 1);
        let found = storage.lookup("v1", "GET /app.js").unwrap();
        assert_eq!(found.snapshot.body, Bytes::from_static(b"new"));
    }

    #[test]
    fn test_put_rejects_oversized_key() {
        let mut storage = CacheStorage::new();
        storage.open("v1");
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        let result = storage.put("v1", long_key, entry(b"x"));
        assert!(matches!(result, Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_put_rejects_oversized_body() {
        let mut storage = CacheStorage::new();
        storage.open("v1");
        let big = CacheEntry::new(ResponseSnapshot::new(
            200,
            vec![],
            vec![0u8; MAX_BODY_SIZE + 1],
            ResponseKind::Basic,
        ));

        let result = storage.put("v1", "GET /huge.bin".to_string(), big);
        assert!(matches!(result, Err(CacheError::QuotaExceeded { .. })));
    }

    #[test]
    fn test_replace_generation_commits_wholesale() {
        let mut storage = CacheStorage::new();
        let mut entries = HashMap::new();
        entries.insert("GET /a.css".to_string(), entry(b"a"));
        entries.insert("GET /b.css".to_string(), entry(b"b"));

        storage.replace_generation("v2", entries).unwrap();

        assert_eq!(storage.len("v2"), 2);
        assert!(storage.contains("v2", "GET /a.css"));
        assert!(storage.contains("v2", "GET /b.css"));
    }

    #[test]
    fn test_replace_generation_discards_previous_contents() {
        let mut storage = CacheStorage::new();
        storage.open("v1");
        storage
            .put("v1", "GET /stale.js".to_string(), entry(b"stale"))
            .unwrap();

        let mut entries = HashMap::new();
        entries.insert("GET /fresh.js".to_string(), entry(b"fresh"));
        storage.replace_generation("v1", entries).unwrap();

        assert_eq!(storage.len("v1"), 1);
        assert!(!storage.contains("v1", "GET /stale.js"));
        assert!(storage.contains("v1", "GET /fresh.js"));
    }

    #[test]
    fn test_replace_generation_rejects_oversized_body() {
        let mut storage = CacheStorage::new();
        let mut entries = HashMap::new();
        entries.insert(
            "GET /huge.bin".to_string(),
            CacheEntry::new(ResponseSnapshot::new(
                200,
                vec![],
                vec![0u8; MAX_BODY_SIZE + 1],
                ResponseKind::Basic,
            )),
        );

        let result = storage.replace_generation("v1", entries);
        assert!(matches!(result, Err(CacheError::QuotaExceeded { .. })));
        // Nothing committed
        assert!(storage.generation_names().is_empty());
    }

    #[test]
    fn test_delete_generation() {
        let mut storage = CacheStorage::new();
        storage.open("v1");
        storage.open("v2");

        assert!(storage.delete_generation("v1"));
        assert!(!storage.delete_generation("v1"));
        assert_eq!(storage.generation_names(), vec!["v2".to_string()]);
    }

    #[test]
    fn test_stats_track_hits_misses_and_totals() {
        let mut storage = CacheStorage::new();
        storage.open("v1");
        storage
            .put("v1", "GET /index.html".to_string(), entry(b"<html>"))
            .unwrap();

        storage.lookup("v1", "GET /index.html"); // hit
        storage.lookup("v1", "GET /missing.js"); // miss

        let stats = storage.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.stores, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
