use crate::cache::ObjectCache;
use crate::errors::{GraderError, Result};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<HashMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    let name = name.into();
    match OBJECT_CACHE_REGISTRY.write() {
        Ok(mut registry) => {
            registry.insert(name, constructor);
        }
        Err(poisoned) => {
            poisoned.into_inner().insert(name, constructor);
        }
    }
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    match OBJECT_CACHE_REGISTRY.read() {
        Ok(registry) => registry.get(name).cloned(),
        Err(poisoned) => poisoned.into_inner().get(name).cloned(),
    }
}

/// 注册内置缓存后端
pub fn register_builtin_object_caches() {
    super::object_cache::moka::register_plugin();
}

/// 按名称构建缓存实例
pub async fn build_object_cache(name: &str) -> Result<Box<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        GraderError::cache_plugin_not_found(format!("Cache backend '{name}' not registered"))
    })?;
    constructor().await
}

pub fn debug_object_cache_registry() {
    let names: Vec<String> = match OBJECT_CACHE_REGISTRY.read() {
        Ok(registry) => registry.keys().cloned().collect(),
        Err(poisoned) => poisoned.into_inner().keys().cloned().collect(),
    };
    if names.is_empty() {
        tracing::debug!("No object cache plugins registered.");
    } else {
        tracing::debug!("Registered object cache plugins:");
        for key in names {
            tracing::debug!(" - {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_plugin_is_reported() {
        let err = build_object_cache("does-not-exist").await.err();
        assert!(matches!(err, Some(GraderError::CachePluginNotFound(_))));
    }

    #[test]
    fn test_builtin_registration() {
        register_builtin_object_caches();
        assert!(get_object_cache_plugin("moka").is_some());
    }
}
