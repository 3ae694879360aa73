use std::path::Path;

use anyhow::Context;
use warden_cache::NormalizedCache;
use warden_config::WardenConfig;

const SAMPLE_CACHE: &str = include_str!("sample_cache.json");

pub fn load_config() -> anyhow::Result<WardenConfig> {
    WardenConfig::load_with_dotenv().context("failed to load warden configuration")
}

/// Read a snapshot file, or fall back to the built-in sample cache.
pub fn load_cache(path: Option<&Path>) -> anyhow::Result<NormalizedCache> {
    let Some(path) = path else {
        tracing::debug!("no --snapshot given; using built-in sample cache");
        return Ok(NormalizedCache::from_json(SAMPLE_CACHE)?);
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    NormalizedCache::from_json(&json)
        .with_context(|| format!("invalid cache snapshot {}", path.display()))
}

#[cfg(test)]
pub fn sample_cache_json() -> &'static str {
    SAMPLE_CACHE
}
