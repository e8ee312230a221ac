//! Toybox Cache - A bounded in-process key-value cache
//!
//! Holds at most `capacity` entries, evicting the least recently used one
//! when full, and forgets any entry older than its TTL.
//!
//! ```
//! use std::time::Duration;
//! use toybox_cache::BoundedExpiringCache;
//!
//! let mut toys = BoundedExpiringCache::new(2, Duration::from_secs(3)).unwrap();
//! toys.put("Car", "Toy Car");
//! toys.put("Doll", "Toy Doll");
//! assert_eq!(toys.get("Car"), Some(&"Toy Car"));
//!
//! // "Doll" is now least recently used
//! toys.put("Blocks", "Toy Blocks");
//! assert_eq!(toys.get("Doll"), None);
//! ```

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{BoundedExpiringCache, Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
