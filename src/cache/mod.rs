//! Cache Module
//!
//! Provides a bounded in-memory cache with TTL expiration and LRU eviction.

mod clock;
mod entry;
mod lru;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use store::BoundedExpiringCache;

pub(crate) use entry::CacheEntry;
pub(crate) use lru::{LruList, NodeId};
