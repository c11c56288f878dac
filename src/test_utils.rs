//! Test utilities for Promptkeep
//!
//! This module provides common test utilities including temporary directory
//! management, in-memory stores, and timestamp helpers.

use crate::config::StorageConfig;
use crate::storage::{CollisionPolicy, MemoryFileSystem, PromptStore};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Build a UTC timestamp from its parts
///
/// # Panics
///
/// Panics if the parts do not form a valid date
pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .expect("valid timestamp")
}

/// Open a store over a fresh in-memory filesystem rooted at `/prompts` and
/// `/history`
///
/// The filesystem handle is returned too so tests can inspect it or inject
/// write failures.
pub async fn memory_store() -> (PromptStore, Arc<MemoryFileSystem>) {
    memory_store_with_policy(CollisionPolicy::Overwrite).await
}

/// Same as [`memory_store`] with an explicit collision policy
pub async fn memory_store_with_policy(
    policy: CollisionPolicy,
) -> (PromptStore, Arc<MemoryFileSystem>) {
    let fs = Arc::new(MemoryFileSystem::new());
    let config = StorageConfig::new("/prompts", "/history")
        .with_collision_policy(policy);
    let store = PromptStore::open(&config, fs.clone())
        .await
        .expect("Failed to open in-memory store");
    (store, fs)
}

/// Open a store on disk inside a fresh temporary directory
pub async fn disk_store() -> (PromptStore, TempDir) {
    let dir = temp_dir();
    let config = StorageConfig::new(dir.path().join("prompts"), dir.path().join("history"));
    let store = PromptStore::open_on_disk(&config)
        .await
        .expect("Failed to open disk store");
    (store, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_utc_helper() {
        assert_eq!(
            utc(2024, 1, 1, 10, 0, 0).to_rfc3339(),
            "2024-01-01T10:00:00+00:00"
        );
    }

    #[tokio::test]
    async fn test_disk_store_creates_roots() {
        let (store, dir) = disk_store().await;
        assert!(dir.path().join("prompts").is_dir());
        assert!(dir.path().join("history").is_dir());
        assert_eq!(store.prompts_dir(), dir.path().join("prompts"));
    }
}
