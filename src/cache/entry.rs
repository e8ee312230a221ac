//! Cache Entry Module
//!
//! Defines an individual cache entry: a value and the instant it was inserted.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry.
///
/// Entries are never modified in place. Re-inserting a key builds a fresh
/// entry with a new timestamp and drops the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with `inserted_at`.
    pub fn new(value: V, inserted_at: Instant) -> Self {
        Self { value, inserted_at }
    }

    /// Returns a reference to the stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry, returning the stored value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Instant the entry was created or last replaced.
    #[allow(dead_code)]
    pub fn inserted_at(&self) -> Instant {
        self.inserted_at
    }

    // == Age ==
    /// Time elapsed since insertion, zero if `now` is earlier.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is still
    /// live. Only a strictly greater age expires it.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) > ttl
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or zero once the TTL is used up.
    pub fn ttl_remaining(&self, now: Instant, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.age(now))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3);

    #[test]
    fn test_entry_creation() {
        let now = Instant::now();
        let entry = CacheEntry::new("Toy Car", now);

        assert_eq!(*entry.value(), "Toy Car");
        assert_eq!(entry.inserted_at(), now);
        assert_eq!(entry.age(now), Duration::ZERO);
        assert!(!entry.is_expired(now, TTL));
    }

    #[test]
    fn test_entry_expiration() {
        let start = Instant::now();
        let entry = CacheEntry::new(1u32, start);

        assert!(!entry.is_expired(start + Duration::from_millis(2999), TTL));
        assert!(entry.is_expired(start + Duration::from_millis(4000), TTL));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let start = Instant::now();
        let entry = CacheEntry::new("test", start);

        // Exactly TTL old is still live
        assert!(!entry.is_expired(start + TTL, TTL));
        assert!(entry.is_expired(start + TTL + Duration::from_nanos(1), TTL));
    }

    #[test]
    fn test_age_before_insertion_is_zero() {
        let start = Instant::now();
        let entry = CacheEntry::new((), start + Duration::from_secs(1));

        assert_eq!(entry.age(start), Duration::ZERO);
        assert!(!entry.is_expired(start, TTL));
    }

    #[test]
    fn test_ttl_remaining() {
        let start = Instant::now();
        let entry = CacheEntry::new("test", start);

        assert_eq!(entry.ttl_remaining(start, TTL), TTL);
        assert_eq!(
            entry.ttl_remaining(start + Duration::from_secs(1), TTL),
            Duration::from_secs(2)
        );
        assert_eq!(
            entry.ttl_remaining(start + Duration::from_secs(10), TTL),
            Duration::ZERO
        );
    }

    #[test]
    fn test_into_value() {
        let entry = CacheEntry::new(String::from("Toy Doll"), Instant::now());
        assert_eq!(entry.into_value(), "Toy Doll");
    }
}
