//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU ordering and TTL expiry.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheEntry, Clock, LruList, NodeId, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

/// Map value: the entry plus its position in the recency list.
struct Slot<V> {
    entry: CacheEntry<V>,
    node: NodeId,
}

// == Bounded Expiring Cache ==
/// Key-value cache bounded by entry count, with LRU eviction and TTL expiry.
///
/// - Every `put` first sweeps out all expired entries, then evicts the least
///   recently used entry if a new key would exceed capacity.
/// - `get` drops an expired entry on sight and refreshes recency on a hit.
///   It never refreshes the TTL: only a new `put` does that.
///
/// Time comes from the clock `C`, so tests can drive expiry with
/// [`ManualClock`](crate::cache::ManualClock) instead of sleeping.
pub struct BoundedExpiringCache<K, V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<K, Slot<V>>,
    /// Recency order, oldest first
    lru: LruList<K>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Maximum entry lifetime since last insert
    ttl: Duration,
    clock: C,
}

impl<K, V> BoundedExpiringCache<K, V, SystemClock>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a cache on the system clock.
    ///
    /// # Errors
    /// `InvalidCapacity` if `capacity` is zero, `InvalidTtl` if `ttl` is zero.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        Self::with_clock(capacity, ttl, SystemClock)
    }

    /// Creates a cache on the system clock from a [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::from_config_with_clock(config, SystemClock)
    }
}

impl<K, V, C> BoundedExpiringCache<K, V, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    /// Creates a cache reading time from `clock`.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: C) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl(ttl));
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            lru: LruList::with_capacity(capacity),
            capacity,
            ttl,
            clock,
        })
    }

    /// Creates a cache from a [`CacheConfig`] reading time from `clock`.
    pub fn from_config_with_clock(config: &CacheConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Self::with_clock(config.capacity, config.ttl(), clock)
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// In order:
    /// 1. all expired entries are removed;
    /// 2. if `key` is new and the cache is full, the least recently used
    ///    entry is evicted;
    /// 3. the entry is stored, stamped with the current time, as the most
    ///    recently used.
    ///
    /// Replacing an existing key never evicts another entry.
    pub fn put(&mut self, key: K, value: V) {
        let now = self.clock.now();
        self.sweep_expired(now);

        if let Some(slot) = self.entries.get_mut(&key) {
            slot.entry = CacheEntry::new(value, now);
            self.lru.move_to_back(slot.node);
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let node = self.lru.push_back(key.clone());
        self.entries.insert(
            key,
            Slot {
                entry: CacheEntry::new(value, now),
                node,
            },
        );
    }

    // == Get ==
    /// Retrieves a value by key, marking it most recently used.
    ///
    /// Returns `None` if the key is absent or expired. An expired entry is
    /// removed on the spot. A hit does not extend the entry's lifetime.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let expired = self.entries.get(key)?.entry.is_expired(now, self.ttl);

        if expired {
            self.remove_slot(key);
            trace!(remaining = self.entries.len(), "expired entry dropped on lookup");
            return None;
        }

        let slot = self.entries.get(key)?;
        self.lru.move_to_back(slot.node);
        Some(slot.entry.value())
    }

    // == Peek ==
    /// Retrieves a live value without touching recency.
    ///
    /// Expired entries are hidden but left in place for the next sweep.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|slot| !slot.entry.is_expired(now, self.ttl))
            .map(|slot| slot.entry.value())
    }

    /// Returns true if `key` holds a live entry. Does not touch recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.peek(key).is_some()
    }

    /// Remaining lifetime of a live entry.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|slot| !slot.entry.is_expired(now, self.ttl))
            .map(|slot| slot.entry.ttl_remaining(now, self.ttl))
    }

    // == Remove ==
    /// Removes an entry by key.
    ///
    /// Returns the value if the entry was live. An expired entry is dropped
    /// as well but yields `None`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let entry = self.remove_slot(key)?;
        if entry.is_expired(now, self.ttl) {
            None
        } else {
            Some(entry.into_value())
        }
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        self.sweep_expired(now)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Length ==
    /// Returns the current number of stored entries.
    ///
    /// Expired entries count until a sweep or lookup removes them.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Iterates keys in eviction order, least recently used first.
    ///
    /// Includes expired entries that have not been swept yet.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.lru.iter()
    }

    // == Expiry Sweep ==
    /// Full scan removing every entry older than the TTL, wherever it sits
    /// in recency order.
    fn sweep_expired(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let lru = &mut self.lru;
        let before = self.entries.len();

        self.entries.retain(|_, slot| {
            if slot.entry.is_expired(now, ttl) {
                lru.remove(slot.node);
                false
            } else {
                true
            }
        });

        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(
                removed,
                remaining = self.entries.len(),
                "swept expired entries"
            );
        }
        removed
    }

    // == Evict Oldest ==
    /// Removes the least recently used entry. No-op on an empty cache.
    fn evict_oldest(&mut self) {
        if let Some(key) = self.lru.pop_front() {
            self.entries.remove(&key);
            debug!(capacity = self.capacity, "evicted least recently used entry");
        }
    }

    fn remove_slot<Q>(&mut self, key: &Q) -> Option<CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.entries.remove(key)?;
        self.lru.remove(slot.node);
        Some(slot.entry)
    }
}

impl<K, V, C> fmt::Debug for BoundedExpiringCache<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedExpiringCache")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .field("len", &self.entries.len())
            .finish()
    }
}
