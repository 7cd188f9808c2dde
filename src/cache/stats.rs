//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, stores and pruned
//! generations.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups answered from the cache
    pub hits: u64,
    /// Number of lookups that found no stored entry
    pub misses: u64,
    /// Number of entries written to the cache
    pub stores: u64,
    /// Number of stale generations deleted during activation
    pub pruned_generations: u64,
    /// Current number of entries across all retained generations
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Store ==
    /// Increments the store counter.
    pub fn record_store(&mut self) {
        self.stores += 1;
    }

    /// Adds a batch of stores, used by wholesale generation commits.
    pub fn record_stores(&mut self, count: u64) {
        self.stores += count;
    }

    // == Record Prune ==
    /// Increments the pruned-generation counter.
    pub fn record_prune(&mut self) {
        self.pruned_generations += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.stores, 0);
        assert_eq!(stats.pruned_generations, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_record_stores_batch() {
        let mut stats = CacheStats::new();
        stats.record_store();
        stats.record_stores(5);
        assert_eq!(stats.stores, 6);
    }

    #[test]
    fn test_record_prune() {
        let mut stats = CacheStats::new();
        stats.record_prune();
        stats.record_prune();
        assert_eq!(stats.pruned_generations, 2);
    }
}
