use anyhow::{Context, Result};
use pulse_core::ResponseCache;
use std::fs;
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".pulse-cache.json";

/// Cache file location: the given directory, or the current one
pub fn cache_path(cache_dir: Option<&Path>) -> PathBuf {
    match cache_dir {
        Some(dir) => dir.join(CACHE_FILE_NAME),
        None => PathBuf::from(CACHE_FILE_NAME),
    }
}

/// Load the session cache, starting empty when no file exists yet
pub fn load(cache_dir: Option<&Path>) -> Result<ResponseCache> {
    let path = cache_path(cache_dir);
    if !path.exists() {
        return Ok(ResponseCache::new());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read cache file: {}", path.display()))?;

    serde_json::from_str(&content).context("Failed to parse cache file")
}

pub fn save(cache: &ResponseCache, cache_dir: Option<&Path>) -> Result<()> {
    let path = cache_path(cache_dir);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(cache)?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write cache file: {}", path.display()))?;

    Ok(())
}
