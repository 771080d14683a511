use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use pulse_core::SearchHistoryEntry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const HISTORY_FILE_NAME: &str = "history.json";
/// Most recent lookups kept
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Persisted list of recent profile lookups, newest first
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchHistory {
    pub entries: Vec<SearchHistoryEntry>,
}

impl SearchHistory {
    pub fn load() -> Result<Self> {
        let path = Self::history_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read history file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse history file")
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::history_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write history file: {}", path.display()))?;
        Ok(())
    }

    /// Remember a lookup: duplicates move to the front, the list caps at 10
    pub fn record(&mut self, username: &str) {
        self.record_at(username, Utc::now());
    }

    pub fn record_at(&mut self, username: &str, now: DateTime<Utc>) {
        self.entries.retain(|e| e.username != username);
        self.entries.insert(0, SearchHistoryEntry::new(username, now));
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delete the stored history file
    pub fn clear() -> Result<()> {
        let path = Self::history_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete history file: {}", path.display()))?;
        }
        Ok(())
    }

    fn history_path() -> Result<PathBuf> {
        let config_path = crate::config::default_config_path()?;
        Ok(config_path
            .parent()
            .map(|dir| dir.join(HISTORY_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(HISTORY_FILE_NAME)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn record_inserts_at_front() {
        let mut history = SearchHistory::default();
        history.record_at("alice", now());
        history.record_at("bob", now());

        assert_eq!(history.entries[0].username, "bob");
        assert_eq!(history.entries[1].username, "alice");
    }

    #[test]
    fn record_deduplicates_most_recent_wins() {
        let mut history = SearchHistory::default();
        history.record_at("alice", now());
        history.record_at("bob", now());
        history.record_at("alice", now());

        assert_eq!(history.entries.len(), 2);
        assert_eq!(history.entries[0].username, "alice");
        assert_eq!(history.entries[1].username, "bob");
    }

    #[test]
    fn record_caps_at_ten_entries() {
        let mut history = SearchHistory::default();
        for i in 0..15 {
            history.record_at(&format!("user{}", i), now());
        }

        assert_eq!(history.entries.len(), MAX_HISTORY_ENTRIES);
        // Newest survived, oldest were dropped
        assert_eq!(history.entries[0].username, "user14");
        assert_eq!(history.entries[9].username, "user5");
    }

    #[test]
    fn entries_carry_profile_urls() {
        let mut history = SearchHistory::default();
        history.record_at("alice", now());
        assert_eq!(history.entries[0].url, "https://github.com/alice");
    }
}
