use warden_cache::{CacheStore, NormalizedCache, SharedCache};
use warden_config::WardenConfig;

/// State shared by every command handler.
pub struct AppContext {
    pub config: WardenConfig,
    pub cache: SharedCache,
}

impl AppContext {
    pub fn new(config: WardenConfig, cache: NormalizedCache) -> Self {
        Self {
            config,
            cache: SharedCache::new(CacheStore::new(cache)),
        }
    }
}
