use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{GraderError, Result};
use crate::services::storage_files::store::ensure_categories;
use crate::storage::Storage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

const FALLBACK_CACHE: &str = "moka";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        GraderError::cache_plugin_not_found(format!("Cache backend '{name}' not found in registry"))
    })?;
    let cache = constructor().await?;
    Ok(Arc::from(cache))
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;
    warn!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != FALLBACK_CACHE => {
            warn!("Failed to create {} cache: {}", cache_type, e);
            warn!("Falling back to default memory cache");
            build_cache(FALLBACK_CACHE).await
        }
        Err(e) => Err(e),
    }
}

/// 确保外部存储分类目录与重命名工作目录存在
async fn prepare_directories() -> Result<()> {
    let config = AppConfig::get();
    ensure_categories(Path::new(&config.storage.root), &config.storage.categories)
        .await
        .map_err(|e| {
            GraderError::file_operation(format!(
                "Failed to prepare storage root {}: {e}",
                config.storage.root
            ))
        })?;
    tokio::fs::create_dir_all(&config.rename.workspace_dir)
        .await
        .map_err(|e| {
            GraderError::file_operation(format!(
                "Failed to prepare rename workspace {}: {e}",
                config.rename.workspace_dir
            ))
        })?;
    Ok(())
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和目录
pub async fn prepare_server_startup() -> Result<StartupContext> {
    crate::cache::register::register_builtin_object_caches();
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let config = AppConfig::get();
    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    // 目录准备失败不阻止启动
    if let Err(e) = prepare_directories().await {
        warn!("{}", e);
    }

    Ok(StartupContext { storage, cache })
}
