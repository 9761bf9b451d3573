//! Time-bounded key cache in front of another resolver

use crate::config::{DEFAULT_KEY_CACHE_CAPACITY, DEFAULT_KEY_CACHE_TTL};
use crate::keys::{BoxFuture, KeyResolver};
use crate::utils::bounds::is_valid_cache_key;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

/// Caches resolved keys by key id
///
/// Only found keys are stored. An unknown `kid` always reaches the inner
/// resolver, so a key published after rotation is picked up on first use.
#[derive(Clone)]
pub struct CachingKeyResolver<R> {
    inner: R,
    cache: Cache<String, String>,
}

impl<R: KeyResolver> CachingKeyResolver<R> {
    /// Cache with the default TTL and capacity
    pub fn new(inner: R) -> Self {
        Self::with_ttl(inner, DEFAULT_KEY_CACHE_TTL)
    }

    pub fn with_ttl(inner: R, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(DEFAULT_KEY_CACHE_CAPACITY)
            .time_to_live(ttl)
            .build();
        Self::with_cache(inner, cache)
    }

    /// Use a preconfigured cache
    ///
    /// Clones of a moka cache share storage, so one cache can back several
    /// resolvers.
    pub fn with_cache(inner: R, cache: Cache<String, String>) -> Self {
        Self { inner, cache }
    }

    /// Drop a cached key
    pub async fn invalidate(&self, kid: &str) {
        self.cache.invalidate(kid).await;
    }

    /// Drop every cached key
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: KeyResolver> KeyResolver for CachingKeyResolver<R> {
    fn get_public_key<'a>(&'a self, kid: Option<&'a str>) -> BoxFuture<'a, Option<String>> {
        Box::pin(async move {
            let kid = kid?;
            let cacheable = is_valid_cache_key(kid);

            if cacheable {
                if let Some(pem) = self.cache.get(kid).await {
                    debug!(kid, "key cache hit");
                    return Some(pem);
                }
                debug!(kid, "key cache miss");
            }

            let pem = self.inner.get_public_key(Some(kid)).await?;

            if cacheable {
                self.cache.insert(kid.to_string(), pem.clone()).await;
            }

            Some(pem)
        })
    }
}
