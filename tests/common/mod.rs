use promptkeep::config::StorageConfig;
use promptkeep::storage::{CollisionPolicy, MemoryFileSystem, PromptStore};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

#[allow(dead_code)]
pub async fn create_disk_store() -> (PromptStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let config = StorageConfig::new(tmp.path().join("prompts"), tmp.path().join("history"));
    let store = PromptStore::open_on_disk(&config)
        .await
        .expect("failed to open disk store");
    (store, tmp)
}

#[allow(dead_code)]
pub async fn create_memory_store() -> (PromptStore, Arc<MemoryFileSystem>) {
    let fs = Arc::new(MemoryFileSystem::new());
    let config = StorageConfig::new("/prompts", "/history");
    let store = PromptStore::open(&config, fs.clone())
        .await
        .expect("failed to open in-memory store");
    (store, fs)
}

#[allow(dead_code)]
pub async fn create_memory_store_with_policy(
    policy: CollisionPolicy,
) -> (PromptStore, Arc<MemoryFileSystem>) {
    let fs = Arc::new(MemoryFileSystem::new());
    let config = StorageConfig::new("/prompts", "/history")
        .with_collision_policy(policy);
    let store = PromptStore::open(&config, fs.clone())
        .await
        .expect("failed to open in-memory store");
    (store, fs)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
