//! Integration tests for the prompt store over the real filesystem
//!
//! Covers the on-disk layout, listing filters, history ordering, and
//! not-found handling end to end.

use chrono::{TimeZone, Utc};
use promptkeep::config::StorageConfig;
use promptkeep::storage::{CollisionPolicy, PromptStore};
use promptkeep::ErrorKind;
use std::fs;
use tempfile::TempDir;

mod common;

#[tokio::test]
async fn test_open_creates_missing_directories_recursively() {
    let tmp = TempDir::new().unwrap();
    let prompts = tmp.path().join("deep/nested/prompts");
    let history = tmp.path().join("deep/nested/history");

    PromptStore::open_on_disk(&StorageConfig::new(&prompts, &history))
        .await
        .expect("open store");

    assert!(prompts.is_dir());
    assert!(history.is_dir());
}

#[tokio::test]
async fn test_save_writes_prompt_and_snapshot_layout() {
    let (store, tmp) = common::create_disk_store().await;
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

    let receipt = store
        .write_prompt_at("greeting.txt", Some("Hello"), at)
        .await
        .expect("save prompt");

    assert_eq!(receipt.history_file, "greeting-2024-01-01-10-00-00.txt");
    assert_eq!(
        fs::read_to_string(tmp.path().join("prompts/greeting.txt")).unwrap(),
        "Hello"
    );
    assert_eq!(
        fs::read_to_string(
            tmp.path()
                .join("history/greeting.txt/greeting-2024-01-01-10-00-00.txt")
        )
        .unwrap(),
        "Hello"
    );
}

#[tokio::test]
async fn test_round_trip_preserves_content_exactly() {
    let (store, _tmp) = common::create_disk_store().await;
    let content = "line one\r\nline two\n\tindented ✓ ünïcödé\n";

    store
        .write_prompt("exact.md", Some(content))
        .await
        .expect("save prompt");

    assert_eq!(store.read_prompt("exact.md").await.unwrap().content, content);
}

#[tokio::test]
async fn test_every_listed_snapshot_is_readable() {
    let (store, _tmp) = common::create_disk_store().await;
    for (i, name) in ["a.txt", "b.md", "a.txt"].iter().enumerate() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, i as u32).unwrap();
        store
            .write_prompt_at(name, Some(format!("v{}", i).as_str()), at)
            .await
            .unwrap();
    }

    let tree = store.list_history_tree().await.unwrap();
    assert_eq!(tree.len(), 2);

    for folder in &tree {
        for file in &folder.files {
            let doc = store
                .read_history_entry(&folder.folder, &file.filename)
                .await
                .expect("listed snapshot must be readable");
            assert_eq!(doc.content.len() as u64, file.size);
        }
    }
}

#[tokio::test]
async fn test_history_is_newest_first_on_disk() {
    let (store, _tmp) = common::create_disk_store().await;
    for sec in 0..3 {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, sec).unwrap();
        store
            .write_prompt_at("p.txt", Some(format!("v{}", sec).as_str()), at)
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    let tree = store.list_history_tree().await.unwrap();
    let files = &tree[0].files;

    assert_eq!(files.len(), 3);
    assert!(files
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
    assert_eq!(files[0].filename, "p-2024-03-01-12-00-02.txt");
}

#[tokio::test]
async fn test_latest_snapshot_matches_saved_content() {
    let (store, _tmp) = common::create_disk_store().await;

    store.write_prompt("f.md", Some("payload")).await.unwrap();

    let tree = store.list_history_tree().await.unwrap();
    let folder = tree.iter().find(|f| f.folder == "f.md").expect("folder");
    let doc = store
        .read_history_entry("f.md", &folder.files[0].filename)
        .await
        .unwrap();
    assert_eq!(doc.content, "payload");
}

#[tokio::test]
async fn test_listing_ignores_other_extensions() {
    let (store, tmp) = common::create_disk_store().await;
    fs::write(tmp.path().join("prompts/notes.json"), "{}").unwrap();
    fs::write(tmp.path().join("prompts/keep.md"), "# keep").unwrap();

    let prompts = store.list_prompts().await.unwrap();

    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].filename, "keep.md");
    assert_eq!(prompts[0].size, 6);
}

#[tokio::test]
async fn test_history_tree_without_archive_root_is_empty() {
    let (store, tmp) = common::create_disk_store().await;
    fs::remove_dir_all(tmp.path().join("history")).unwrap();

    assert!(store.list_history_tree().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_entries_are_not_found() {
    let (store, _tmp) = common::create_disk_store().await;

    let err = store.read_prompt("nope.txt").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = store
        .read_history_entry("nope.txt", "nope-2024-01-01-00-00-00.txt")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_suffix_policy_on_disk() {
    let tmp = TempDir::new().unwrap();
    let config = StorageConfig::new(tmp.path().join("p"), tmp.path().join("h"))
        .with_collision_policy(CollisionPolicy::Suffix);
    let store = PromptStore::open_on_disk(&config).await.unwrap();
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

    store
        .write_prompt_at("a.md", Some("one"), at)
        .await
        .unwrap();
    let second = store
        .write_prompt_at("a.md", Some("two"), at)
        .await
        .unwrap();

    assert_eq!(second.history_file, "a-2024-01-01-10-00-00-1.md");
    let tree = store.list_history_tree().await.unwrap();
    assert_eq!(tree[0].files.len(), 2);
}

#[tokio::test]
async fn test_snapshot_under_plain_file_is_not_found() {
    let (store, tmp) = common::create_disk_store().await;
    fs::write(tmp.path().join("history/stray.txt"), "x").unwrap();

    let err = store
        .read_history_entry("stray.txt", "stray-2024-01-01-00-00-00.txt")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = store
        .restore_history_entry("stray.txt", "stray-2024-01-01-00-00-00.txt")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!tmp.path().join("prompts/stray.txt").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_suffix_saves_on_disk_keep_every_snapshot() {
    let tmp = TempDir::new().unwrap();
    let config = StorageConfig::new(tmp.path().join("p"), tmp.path().join("h"))
        .with_collision_policy(CollisionPolicy::Suffix);
    let store = PromptStore::open_on_disk(&config).await.unwrap();
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let content = format!("v{}", i);
                store
                    .write_prompt_at("race.md", Some(content.as_str()), at)
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let snapshots = fs::read_dir(tmp.path().join("h/race.md")).unwrap().count();
    assert_eq!(snapshots, 6);
}
