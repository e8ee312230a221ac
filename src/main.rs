//! Toybox Cache demo
//!
//! Walks through the cache's behavior in real time: two toys go in, one is
//! played with, both outlive their TTL, and a new toy still fits afterwards.

use std::thread::sleep;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toybox_cache::{BoundedExpiringCache, CacheConfig};

/// Main entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Build a cache holding 2 toys for 3 seconds each (env overridable)
/// 3. Insert two toys and read one back
/// 4. Wait past the TTL and show that reads miss
/// 5. Insert a new toy to show capacity handling still works
fn main() -> anyhow::Result<()> {
    // Defaults to "debug" for this crate, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toybox_cache=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = demo_config().context("failed to load cache configuration")?;
    info!(
        "Configuration loaded: capacity={}, ttl={}ms",
        config.capacity, config.ttl_ms
    );

    let mut toy_box = BoundedExpiringCache::from_config(&config)
        .context("failed to build cache from configuration")?;

    toy_box.put("Car", "Toy Car");
    toy_box.put("Doll", "Toy Doll");
    info!("get(Car) = {:?}", toy_box.get("Car"));

    let wait = config.ttl() + Duration::from_millis(1000);
    info!("Sleeping {:?} so every toy expires", wait);
    sleep(wait);

    info!("get(Car) = {:?}", toy_box.get("Car"));
    toy_box.put("Blocks", "Toy Blocks");
    info!("get(Doll) = {:?}", toy_box.get("Doll"));
    info!("get(Blocks) = {:?}", toy_box.get("Blocks"));

    info!("Demo complete, {} entries left", toy_box.len());
    Ok(())
}

/// Capacity 2 and a 3 second TTL unless the environment says otherwise.
fn demo_config() -> toybox_cache::Result<CacheConfig> {
    CacheConfig::from_env_or(CacheConfig::new(2, Duration::from_millis(3000))?)
}
