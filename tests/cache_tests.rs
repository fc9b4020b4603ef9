//! Integration Tests for the Transparent Cache
//!
//! Drives the public cache API against a simulated upstream service with
//! realistic latency.

use std::sync::Arc;
use std::time::{Duration, Instant};

use price_cache::{BlockingPriceService, CacheError, SimulatedPriceService, TransparentCache};

// == Test Configuration ==
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(3);
const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(200);
const TIMING_RULE: Duration = Duration::from_millis(1500);
const PRICE: f64 = 12.34;

fn cache_with(service: &Arc<SimulatedPriceService>) -> TransparentCache {
    TransparentCache::new(service.clone(), DEFAULT_MAX_AGE)
}

// == Single-key Lookups ==

#[tokio::test]
async fn test_get_price_for_non_cached() {
    let service = Arc::new(SimulatedPriceService::new(PRICE, DEFAULT_RESPONSE_DELAY));
    let cache = cache_with(&service);

    let price = cache.get_price_for("someItemCode").await.unwrap();

    assert_eq!(price, PRICE);
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn test_get_price_for_cached_skips_delay() {
    let service = Arc::new(SimulatedPriceService::new(PRICE, DEFAULT_RESPONSE_DELAY));
    let cache = cache_with(&service);

    // First call caches the price
    cache.get_price_for("someItemCode").await.unwrap();

    // Second call is served from the cache
    let start = Instant::now();
    let price = cache.get_price_for("someItemCode").await.unwrap();

    assert_eq!(price, PRICE);
    assert!(start.elapsed() < DEFAULT_RESPONSE_DELAY);
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn test_get_price_for_error_is_not_cached() {
    let service = Arc::new(SimulatedPriceService::new(PRICE, DEFAULT_RESPONSE_DELAY));
    service.set_fail_all(true);
    let cache = cache_with(&service);

    let err = cache.get_price_for("someItemCode").await.unwrap_err();
    assert!(matches!(err, CacheError::UpstreamLookupFailed { .. }));

    // Once the upstream recovers the cache still has to ask it
    service.set_fail_all(false);
    let price = cache.get_price_for("someItemCode").await.unwrap();

    assert_eq!(price, PRICE);
    assert_eq!(service.calls(), 2);
}

#[tokio::test]
async fn test_concurrent_misses_on_same_key_all_succeed() {
    let service = Arc::new(SimulatedPriceService::new(PRICE, Duration::from_millis(100)));
    let cache = cache_with(&service);

    let (a, b, c) = tokio::join!(
        cache.get_price_for("Item1"),
        cache.get_price_for("Item1"),
        cache.get_price_for("Item1"),
    );

    assert_eq!(a.unwrap(), PRICE);
    assert_eq!(b.unwrap(), PRICE);
    assert_eq!(c.unwrap(), PRICE);
    // No single-flight: every concurrent miss reaches the upstream service
    assert_eq!(service.calls(), 3);
    assert_eq!(cache.len().await, 1);
}

// == Batch Lookups ==

#[tokio::test]
async fn test_get_prices_for_ok() {
    let service = Arc::new(SimulatedPriceService::new(PRICE, Duration::from_millis(500)));
    let cache = cache_with(&service);

    let prices = cache
        .get_prices_for(["SomeItemCode", "AnotherItemCode", "CoolItemCode"])
        .await
        .unwrap();

    assert_eq!(prices, vec![PRICE; 3]);
}

#[tokio::test]
async fn test_get_prices_for_error() {
    let service = Arc::new(SimulatedPriceService::new(PRICE, Duration::from_millis(500)));
    service.set_fail_all(true);
    let cache = cache_with(&service);

    let err = cache
        .get_prices_for(["SomeItemCode", "AnotherItemCode", "CoolItemCode"])
        .await
        .unwrap_err();

    assert!(err.resolved.is_empty());
    assert!(matches!(err.cause, CacheError::UpstreamLookupFailed { .. }));
}

#[tokio::test]
async fn test_get_prices_timing_rule() {
    let service = Arc::new(SimulatedPriceService::new(PRICE, Duration::from_secs(1)));
    let cache = cache_with(&service);

    let start = Instant::now();
    cache
        .get_prices_for(["Item1", "Item2", "Item3", "Item4", "Item5"])
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert!(
        elapsed < TIMING_RULE,
        "5 items should take less than {:?}, took {:?}",
        TIMING_RULE,
        elapsed
    );
}

#[tokio::test]
async fn test_get_prices_for_no_items() {
    let service = Arc::new(SimulatedPriceService::new(PRICE, DEFAULT_RESPONSE_DELAY));
    let cache = cache_with(&service);

    let prices = cache.get_prices_for(Vec::<String>::new()).await.unwrap();

    assert!(prices.is_empty());
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn test_get_prices_for_mixes_cached_and_fetched() {
    let service = Arc::new(SimulatedPriceService::new(PRICE, Duration::from_millis(300)));
    let cache = cache_with(&service);

    cache.get_price_for("Item1").await.unwrap();

    let start = Instant::now();
    let prices = cache.get_prices_for(["Item1", "Item2", "Item3"]).await.unwrap();

    assert_eq!(prices.len(), 3);
    assert_eq!(service.calls(), 3);
    assert!(start.elapsed() < Duration::from_millis(600));
}

#[tokio::test]
async fn test_bounded_fan_out_still_resolves_everything() {
    let service = Arc::new(SimulatedPriceService::new(PRICE, Duration::from_millis(100)));
    let cache = cache_with(&service).with_max_concurrency(2);

    let start = Instant::now();
    let prices = cache
        .get_prices_for(["Item1", "Item2", "Item3", "Item4"])
        .await
        .unwrap();

    assert_eq!(prices.len(), 4);
    // Two waves of two lookups each
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_blocking_upstream_batch_is_parallel() {
    let service = Arc::new(BlockingPriceService::new(|_: &str| -> anyhow::Result<f64> {
        std::thread::sleep(Duration::from_millis(300));
        Ok(PRICE)
    }));
    let cache = TransparentCache::new(service, DEFAULT_MAX_AGE);

    let start = Instant::now();
    let prices = cache
        .get_prices_for(["Item1", "Item2", "Item3"])
        .await
        .unwrap();

    assert_eq!(prices, vec![PRICE; 3]);
    // Strictly less than half of the sequential 900ms
    assert!(start.elapsed() < Duration::from_millis(450));
}
