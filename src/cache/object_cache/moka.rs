use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

pub struct MokaCacheWrapper {
    inner: Cache<String, String>,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        Ok(Self::with_settings(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    /// 使用显式容量与 TTL（秒）构建
    pub fn with_settings(max_capacity: u64, ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, ttl: {}s",
            max_capacity, ttl_secs
        );
        Self { inner }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some(value) = self.inner.get(key).await {
            debug!("Cache hit: {}", key);
            CacheResult::Found(value)
        } else {
            debug!("Cache miss: {}", key);
            CacheResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        // TTL 在构建时全局设定
        self.inner.insert(key, value).await;
        if ttl != 0 {
            debug!("Moka cache ignores per-item TTL, using global TTL configuration");
        }
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{get_json, put_json};

    #[tokio::test]
    async fn test_insert_then_invalidate_all() {
        let cache = MokaCacheWrapper::with_settings(100, 60);
        cache
            .insert_raw("questions:all".to_string(), "[]".to_string(), 60)
            .await;
        assert_eq!(
            cache.get_raw("questions:all").await,
            CacheResult::Found("[]".to_string())
        );

        cache.invalidate_all().await;
        assert_eq!(cache.get_raw("questions:all").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let cache = MokaCacheWrapper::with_settings(100, 60);
        put_json(&cache, "k", &vec![1_i64, 2, 3], 60).await;
        let value: Option<Vec<i64>> = get_json(&cache, "k").await;
        assert_eq!(value, Some(vec![1, 2, 3]));

        cache.insert_raw("bad".to_string(), "{not json".to_string(), 60).await;
        let broken: Option<Vec<i64>> = get_json(&cache, "bad").await;
        assert!(broken.is_none());
        assert_eq!(cache.get_raw("bad").await, CacheResult::NotFound);
    }
}
