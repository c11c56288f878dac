//! Versioned prompt store
//!
//! The store manages two directories:
//!
//! - the **prompt collection**, a flat directory of current prompt files
//! - the **history archive**, holding one folder per prompt with an
//!   immutable timestamped snapshot for every save
//!
//! ```text
//! <prompts_dir>/<filename>
//! <history_dir>/<filename>/<basename>-<YYYY-MM-DD-HH-MM-SS><ext>
//! ```
//!
//! All filesystem access goes through a [`FileSystem`] handle so the store
//! runs unchanged against the disk or [`MemoryFileSystem`]. No state is kept
//! between calls; the filesystem is the only source of truth.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::StorageConfig;
use crate::error::{PromptKeepError, StoreResult};

pub mod fs;
pub mod memory;
pub mod naming;
pub mod paths;
pub mod types;

pub use fs::{DiskFileSystem, FileSystem};
pub use memory::MemoryFileSystem;
pub use naming::CollisionPolicy;
pub use types::{
    HistoryFolder, PromptDocument, PromptSummary, SaveReceipt, SnapshotDocument, SnapshotSummary,
};

/// Extensions a file must carry to show up in [`PromptStore::list_prompts`]
pub const PROMPT_EXTENSIONS: &[&str] = &[".txt", ".md"];

/// Returns true if `filename` ends in one of [`PROMPT_EXTENSIONS`]
pub fn is_prompt_file(filename: &str) -> bool {
    PROMPT_EXTENSIONS.iter().any(|ext| filename.ends_with(ext))
}

/// Filesystem-backed prompt store with per-file snapshot history
#[derive(Debug, Clone)]
pub struct PromptStore {
    fs: Arc<dyn FileSystem>,
    prompts_dir: PathBuf,
    history_dir: PathBuf,
    collision_policy: CollisionPolicy,
}

impl PromptStore {
    /// Open a store over the given filesystem
    ///
    /// Creates the prompt collection and history archive directories if they
    /// do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `PromptKeepError::Io` if either directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use promptkeep::config::StorageConfig;
    /// use promptkeep::storage::{MemoryFileSystem, PromptStore};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let config = StorageConfig::new("/prompts", "/history");
    /// let store = PromptStore::open(&config, Arc::new(MemoryFileSystem::new()))
    ///     .await
    ///     .unwrap();
    /// let receipt = store.write_prompt("hello.txt", Some("Hello")).await.unwrap();
    /// assert!(receipt.history_file.starts_with("hello-"));
    /// # }
    /// ```
    pub async fn open(config: &StorageConfig, fs: Arc<dyn FileSystem>) -> StoreResult<Self> {
        let store = Self {
            fs,
            prompts_dir: config.prompts_dir.clone(),
            history_dir: config.history_dir.clone(),
            collision_policy: config.collision_policy,
        };

        for dir in [&store.prompts_dir, &store.history_dir] {
            store.fs.create_dir_all(dir).await.map_err(|e| {
                PromptKeepError::io(format!("Failed to create {}", dir.display()), e)
            })?;
        }

        tracing::debug!(
            prompts_dir = %store.prompts_dir.display(),
            history_dir = %store.history_dir.display(),
            "Prompt store ready"
        );
        Ok(store)
    }

    /// Open a store over the real filesystem
    pub async fn open_on_disk(config: &StorageConfig) -> StoreResult<Self> {
        Self::open(config, Arc::new(DiskFileSystem::new())).await
    }

    /// Root of the prompt collection
    pub fn prompts_dir(&self) -> &Path {
        &self.prompts_dir
    }

    /// Root of the history archive
    pub fn history_dir(&self) -> &Path {
        &self.history_dir
    }

    /// List every `.txt`/`.md` file in the prompt collection, sorted by name
    pub async fn list_prompts(&self) -> StoreResult<Vec<PromptSummary>> {
        let entries = self
            .fs
            .read_dir(&self.prompts_dir)
            .await
            .map_err(|e| PromptKeepError::io("Failed to list prompts", e))?;

        let mut prompts = Vec::new();
        for entry in entries {
            if entry.is_dir || !is_prompt_file(&entry.name) {
                continue;
            }
            let stat = self
                .fs
                .metadata(&self.prompts_dir.join(&entry.name))
                .await
                .map_err(|e| PromptKeepError::io(format!("Failed to stat {}", entry.name), e))?;
            prompts.push(PromptSummary {
                filename: entry.name,
                modified_at: DateTime::<Utc>::from(stat.modified),
                size: stat.len,
            });
        }

        prompts.sort_by(|a, b| a.filename.cmp(&b.filename));
        tracing::debug!("Listed {} prompts", prompts.len());
        Ok(prompts)
    }

    /// Read the current content of a prompt
    ///
    /// # Errors
    ///
    /// - `PromptKeepError::Validation` if `filename` is not a plain name
    /// - `PromptKeepError::NotFound` if the prompt does not exist
    /// - `PromptKeepError::Io` on read or UTF-8 decoding failure
    pub async fn read_prompt(&self, filename: &str) -> StoreResult<PromptDocument> {
        paths::validate_name("filename", filename)?;

        let content = self
            .read_text(
                &self.prompts_dir.join(filename),
                || format!("Prompt not found: {}", filename),
                || format!("Failed to read prompt {}", filename),
            )
            .await?;

        Ok(PromptDocument {
            filename: filename.to_string(),
            content,
        })
    }

    /// Save a prompt and snapshot it into its history folder
    ///
    /// `content` of `None` means the caller supplied no content at all, which
    /// is a validation error; `Some("")` is a valid empty save.
    pub async fn write_prompt(
        &self,
        filename: &str,
        content: Option<&str>,
    ) -> StoreResult<SaveReceipt> {
        self.write_prompt_at(filename, content, Utc::now()).await
    }

    /// Save a prompt using `at` as the snapshot time
    ///
    /// Steps run in order: primary write, history folder creation, snapshot
    /// write. The steps are not atomic. If the primary write succeeds and a
    /// later step fails, the prompt keeps its new content and the error is
    /// returned with the snapshot step named in its context.
    ///
    /// # Errors
    ///
    /// - `PromptKeepError::Validation` if `content` is `None` or `filename` is
    ///   not a plain name (no filesystem writes happen)
    /// - `PromptKeepError::Io` if any write fails
    pub async fn write_prompt_at(
        &self,
        filename: &str,
        content: Option<&str>,
        at: DateTime<Utc>,
    ) -> StoreResult<SaveReceipt> {
        let content = content
            .ok_or_else(|| PromptKeepError::Validation("Content is required".to_string()))?;
        paths::validate_name("filename", filename)?;

        self.fs
            .write(&self.prompts_dir.join(filename), content.as_bytes())
            .await
            .map_err(|e| PromptKeepError::io(format!("Failed to write prompt {}", filename), e))?;

        let history_file = self
            .write_snapshot(filename, content, at)
            .await
            .map_err(|e| {
                tracing::warn!(
                    "Prompt {} was saved but its history snapshot failed: {}",
                    filename,
                    e
                );
                e
            })?;

        tracing::info!("Saved {} (snapshot {})", filename, history_file);
        Ok(SaveReceipt {
            success: true,
            filename: filename.to_string(),
            history_file,
        })
    }

    async fn write_snapshot(
        &self,
        filename: &str,
        content: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<String> {
        let folder = self.history_dir.join(filename);
        self.fs.create_dir_all(&folder).await.map_err(|e| {
            PromptKeepError::io(
                format!("Failed to create history folder for {}", filename),
                e,
            )
        })?;

        let candidate = naming::snapshot_filename(filename, at);
        let written = match self.collision_policy {
            CollisionPolicy::Overwrite => {
                self.overwrite_snapshot(&folder, candidate, content).await
            }
            CollisionPolicy::Suffix => self.create_snapshot(&folder, candidate, content).await,
        };

        written.map_err(|(snapshot, e)| {
            PromptKeepError::io(
                format!(
                    "Failed to write history snapshot {} for {}",
                    snapshot, filename
                ),
                e,
            )
        })
    }

    async fn overwrite_snapshot(
        &self,
        folder: &Path,
        snapshot: String,
        content: &str,
    ) -> Result<String, (String, io::Error)> {
        let path = folder.join(&snapshot);
        if self.fs.metadata(&path).await.is_ok() {
            tracing::warn!(
                "Snapshot {} already exists in {}; overwriting",
                snapshot,
                folder.display()
            );
        }

        match self.fs.write(&path, content.as_bytes()).await {
            Ok(()) => Ok(snapshot),
            Err(e) => Err((snapshot, e)),
        }
    }

    /// Claim the first free name among `candidate`, `candidate-1`, ...
    ///
    /// Each attempt is an exclusive create, so concurrent saves in the same
    /// second never land on the same snapshot.
    async fn create_snapshot(
        &self,
        folder: &Path,
        candidate: String,
        content: &str,
    ) -> Result<String, (String, io::Error)> {
        let mut snapshot = candidate.clone();
        let mut n = 0;
        loop {
            match self
                .fs
                .create_new(&folder.join(&snapshot), content.as_bytes())
                .await
            {
                Ok(()) => return Ok(snapshot),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    n += 1;
                    let next = naming::with_suffix(&candidate, n);
                    tracing::debug!("Snapshot {} taken, trying {}", snapshot, next);
                    snapshot = next;
                }
                Err(e) => return Err((snapshot, e)),
            }
        }
    }

    /// List every history folder with its snapshots, newest first
    ///
    /// Folders are sorted by name. Within a folder, snapshots are ordered by
    /// creation time descending. Ties fall back to the save time and collision
    /// suffix encoded in the snapshot name, newest first. Plain
    /// files at the archive root are skipped. A missing archive root yields
    /// an empty list.
    pub async fn list_history_tree(&self) -> StoreResult<Vec<HistoryFolder>> {
        let entries = match self.fs.read_dir(&self.history_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PromptKeepError::io("Failed to list history", e)),
        };

        let mut tree = Vec::new();
        for entry in entries.into_iter().filter(|entry| entry.is_dir) {
            let folder_path = self.history_dir.join(&entry.name);
            let files = self.fs.read_dir(&folder_path).await.map_err(|e| {
                PromptKeepError::io(
                    format!("Failed to list history folder {}", entry.name),
                    e,
                )
            })?;

            let mut snapshots = Vec::new();
            for file in files.into_iter().filter(|file| !file.is_dir) {
                let stat = self
                    .fs
                    .metadata(&folder_path.join(&file.name))
                    .await
                    .map_err(|e| {
                        PromptKeepError::io(
                            format!("Failed to stat {}/{}", entry.name, file.name),
                            e,
                        )
                    })?;
                snapshots.push(SnapshotSummary {
                    filename: file.name,
                    created_at: DateTime::<Utc>::from(stat.created),
                    size: stat.len,
                });
            }

            snapshots.sort_by(|a, b| {
                let key_a = naming::parse_snapshot_name(&entry.name, &a.filename);
                let key_b = naming::parse_snapshot_name(&entry.name, &b.filename);
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| key_b.cmp(&key_a))
                    .then_with(|| b.filename.cmp(&a.filename))
            });

            tree.push(HistoryFolder {
                folder: entry.name,
                files: snapshots,
            });
        }

        tree.sort_by(|a, b| a.folder.cmp(&b.folder));
        Ok(tree)
    }

    /// Read one snapshot
    ///
    /// # Errors
    ///
    /// - `PromptKeepError::Validation` if either name is not a plain name
    /// - `PromptKeepError::NotFound` if the snapshot does not exist, including
    ///   when `folder` is missing or is a plain file
    /// - `PromptKeepError::Io` on read or UTF-8 decoding failure
    pub async fn read_history_entry(
        &self,
        folder: &str,
        filename: &str,
    ) -> StoreResult<SnapshotDocument> {
        paths::validate_name("folder", folder)?;
        paths::validate_name("filename", filename)?;

        let not_found = || format!("History file not found: {}/{}", folder, filename);
        let folder_path = self.history_dir.join(folder);
        if !self.is_dir(&folder_path).await? {
            return Err(PromptKeepError::NotFound(not_found()));
        }

        let content = self
            .read_text(
                &folder_path.join(filename),
                not_found,
                || format!("Failed to read history file {}/{}", folder, filename),
            )
            .await?;

        Ok(SnapshotDocument {
            folder: folder.to_string(),
            filename: filename.to_string(),
            content,
        })
    }

    /// Make a snapshot the current content of its prompt
    ///
    /// The snapshot in `folder` is written back to the prompt named `folder`
    /// through [`write_prompt`](Self::write_prompt), so the restore is itself
    /// recorded as a new snapshot.
    pub async fn restore_history_entry(
        &self,
        folder: &str,
        filename: &str,
    ) -> StoreResult<SaveReceipt> {
        let snapshot = self.read_history_entry(folder, filename).await?;
        tracing::info!("Restoring {} from snapshot {}", folder, filename);
        self.write_prompt(folder, Some(snapshot.content.as_str()))
            .await
    }

    async fn read_text(
        &self,
        path: &Path,
        not_found: impl FnOnce() -> String,
        context: impl FnOnce() -> String,
    ) -> StoreResult<String> {
        let bytes = match self.fs.read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PromptKeepError::NotFound(not_found()));
            }
            Err(e) => return Err(PromptKeepError::io(context(), e)),
        };

        String::from_utf8(bytes).map_err(|e| {
            PromptKeepError::io(context(), io::Error::new(io::ErrorKind::InvalidData, e))
        })
    }

    async fn is_dir(&self, path: &Path) -> StoreResult<bool> {
        match self.fs.metadata(path).await {
            Ok(stat) => Ok(stat.is_dir),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PromptKeepError::io(
                format!("Failed to stat {}", path.display()),
                e,
            )),
        }
    }
}
