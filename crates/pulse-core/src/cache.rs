use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::ProfileBundle;

/// How long a cached bundle stays valid (5 minutes)
pub const CACHE_TTL_MS: i64 = 5 * 60 * 1000;

/// One cached fetch result with its insertion timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub bundle: ProfileBundle,
    pub fetched_at: DateTime<Utc>,
}

/// Time-boxed store for profile+repository fetches
///
/// Entries expire five minutes after insertion and are evicted lazily on the
/// next lookup; there is no background sweep. The store is serializable so a
/// short-lived process can round-trip it through a session file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache key bundling one username's profile+repository fetch
    pub fn key_for(username: &str) -> String {
        format!("user_{}", username)
    }

    /// Look up a fresh entry, deleting it if it has expired
    pub fn get(&mut self, key: &str) -> Option<ProfileBundle> {
        self.get_at(key, Utc::now())
    }

    /// Clock-injectable lookup backing `get`
    pub fn get_at(&mut self, key: &str, now: DateTime<Utc>) -> Option<ProfileBundle> {
        match self.entries.get(key) {
            Some(entry)
                if now.signed_duration_since(entry.fetched_at)
                    < Duration::milliseconds(CACHE_TTL_MS) =>
            {
                Some(entry.bundle.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&mut self, key: &str, bundle: ProfileBundle) {
        self.put_at(key, bundle, Utc::now());
    }

    /// Clock-injectable insert backing `put`
    pub fn put_at(&mut self, key: &str, bundle: ProfileBundle, now: DateTime<Utc>) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                bundle,
                fetched_at: now,
            },
        );
    }

    /// Whether the key is physically present, fresh or not
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
