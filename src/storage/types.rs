use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Listing entry for a prompt in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSummary {
    /// File name, including extension
    pub filename: String,
    /// Last write time (filesystem mtime)
    pub modified_at: DateTime<Utc>,
    /// Size of the current content in bytes
    pub size: u64,
}

/// Current content of a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptDocument {
    /// File name, including extension
    pub filename: String,
    /// UTF-8 content
    pub content: String,
}

/// Result of a successful save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    /// Always true; failures are reported as errors
    pub success: bool,
    /// The prompt that was written
    pub filename: String,
    /// Name of the snapshot written into the prompt's history folder
    pub history_file: String,
}

/// Listing entry for one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    /// Snapshot file name
    pub filename: String,
    /// Snapshot creation time (filesystem birth time)
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size: u64,
}

/// A history folder and its snapshots, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFolder {
    /// Folder name; equals the owning prompt's file name
    pub folder: String,
    /// Snapshots ordered by creation time, newest first
    pub files: Vec<SnapshotSummary>,
}

/// Content of one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// History folder the snapshot lives in
    pub folder: String,
    /// Snapshot file name
    pub filename: String,
    /// UTF-8 content captured at save time
    pub content: String,
}
