//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment
//! variables or any serde-supported source.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Default maximum number of entries
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default entry lifetime in milliseconds
pub const DEFAULT_TTL_MS: u64 = 300_000;

/// Cache configuration parameters.
///
/// Both values are fixed once a cache is built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of distinct keys the cache can hold
    pub capacity: usize,
    /// Maximum lifetime of an entry since its last insert, in milliseconds
    pub ttl_ms: u64,
}

impl CacheConfig {
    /// Creates a config from explicit values.
    ///
    /// # Errors
    /// `UnrepresentableTtl` if `ttl` has a sub-millisecond part or does not
    /// fit in `u64` milliseconds. The TTL is never rounded.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        if ttl.subsec_nanos() % 1_000_000 != 0 {
            return Err(CacheError::UnrepresentableTtl(ttl));
        }
        let ttl_ms =
            u64::try_from(ttl.as_millis()).map_err(|_| CacheError::UnrepresentableTtl(ttl))?;
        Ok(Self { capacity, ttl_ms })
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_MS` - Entry lifetime in milliseconds (default: 300000)
    ///
    /// Missing variables fall back to defaults. Present but unparsable ones
    /// are an error rather than being silently ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_env_or(Self::default())
    }

    /// Like [`from_env`](Self::from_env), but missing variables fall back to
    /// `defaults` instead of the crate defaults.
    pub fn from_env_or(defaults: Self) -> Result<Self> {
        Ok(Self {
            capacity: env_or("CACHE_CAPACITY", defaults.capacity)?,
            ttl_ms: env_or("CACHE_TTL_MS", defaults.ttl_ms)?,
        })
    }

    /// Returns the TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Rejects a zero capacity or a zero TTL.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        if self.ttl_ms == 0 {
            return Err(CacheError::InvalidTtl(self.ttl()));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl_ms: DEFAULT_TTL_MS,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CacheError::InvalidConfig(format!("{}={}", name, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.ttl_ms, 300_000);
        assert_eq!(config.ttl(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    // Single test touches the env vars so parallel tests don't race on them
    #[test]
    fn test_config_from_env() {
        env::remove_var("CACHE_CAPACITY");
        env::remove_var("CACHE_TTL_MS");
        assert_eq!(CacheConfig::from_env().unwrap(), CacheConfig::default());

        let demo = CacheConfig::new(2, Duration::from_millis(3000)).unwrap();
        assert_eq!(CacheConfig::from_env_or(demo).unwrap(), demo);

        env::set_var("CACHE_CAPACITY", "2");
        env::set_var("CACHE_TTL_MS", "3000");
        let config = CacheConfig::from_env().unwrap();
        assert_eq!(config.capacity, 2);
        assert_eq!(config.ttl(), Duration::from_millis(3000));

        env::set_var("CACHE_TTL_MS", "soon");
        let err = CacheConfig::from_env().unwrap_err();
        assert_eq!(
            err,
            CacheError::InvalidConfig("CACHE_TTL_MS=soon".to_string())
        );

        env::remove_var("CACHE_CAPACITY");
        env::remove_var("CACHE_TTL_MS");
    }

    #[test]
    fn test_config_validate() {
        let zero_capacity = CacheConfig::new(0, Duration::from_secs(1)).unwrap();
        assert_eq!(
            zero_capacity.validate(),
            Err(CacheError::InvalidCapacity(0))
        );

        let zero_ttl = CacheConfig::new(10, Duration::ZERO).unwrap();
        assert_eq!(zero_ttl.validate(), Err(CacheError::InvalidTtl(Duration::ZERO)));
    }

    #[test]
    fn test_config_new_keeps_exact_ttl() {
        let config = CacheConfig::new(2, Duration::from_secs(3)).unwrap();
        assert_eq!(config.ttl_ms, 3000);
        assert_eq!(config.ttl(), Duration::from_secs(3));
    }

    #[test]
    fn test_config_new_rejects_sub_millisecond_ttl() {
        for ttl in [Duration::from_micros(500), Duration::from_micros(1999)] {
            assert_eq!(
                CacheConfig::new(2, ttl),
                Err(CacheError::UnrepresentableTtl(ttl))
            );
        }
    }

    #[test]
    fn test_config_new_rejects_overflowing_ttl() {
        let ttl = Duration::from_secs(u64::MAX);
        assert_eq!(
            CacheConfig::new(2, ttl),
            Err(CacheError::UnrepresentableTtl(ttl))
        );
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: CacheConfig = serde_json::from_str(r#"{"capacity":2}"#).unwrap();
        assert_eq!(config.capacity, 2);
        assert_eq!(config.ttl_ms, DEFAULT_TTL_MS);

        let json = serde_json::to_value(CacheConfig::new(5, Duration::from_millis(750)).unwrap()).unwrap();
        assert_eq!(json["capacity"], 5);
        assert_eq!(json["ttl_ms"], 750);
    }
}
